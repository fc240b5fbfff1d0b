//! 资源服务
//!
//! 每个服务对应后端的一个REST路径前缀，CRUD操作直接透传给 [`ApiClient`]。

use async_trait::async_trait;
use clinic_core::Identified;
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::Serialize;

use crate::client::ApiClient;
use crate::error::Result;

mod appointments;
mod doctors;
mod invoices;
mod medical_records;
mod notifications;
mod patients;
mod treatments;

pub use appointments::AppointmentService;
pub use doctors::DoctorService;
pub use invoices::InvoiceService;
pub use medical_records::MedicalRecordService;
pub use notifications::NotificationService;
pub use patients::PatientService;
pub use treatments::TreatmentService;

/// 单一资源的CRUD服务接口
#[async_trait]
pub trait CrudService: Send + Sync {
    /// 后端返回的实体
    type Entity: DeserializeOwned + Identified + Clone + Send + Sync;
    /// 创建请求体
    type Create: Serialize + Send + Sync;
    /// 更新请求体
    type Update: Serialize + Send + Sync;

    /// 路径前缀，如 `/patients`
    const BASE_PATH: &'static str;
    /// 列表提示中的名称，如 "los pacientes"
    const PLURAL: &'static str;
    /// 单项提示中的名称，如 "el paciente"
    const SINGULAR: &'static str;

    fn client(&self) -> &ApiClient;

    /// 单个实体的路径
    fn item_path(id: &str) -> String {
        format!("{}/{}", Self::BASE_PATH, id)
    }

    /// 获取全部实体
    async fn list(&self) -> Result<Vec<Self::Entity>> {
        self.client().get(Self::BASE_PATH).await
    }

    /// 按ID获取实体
    async fn get(&self, id: &str) -> Result<Self::Entity> {
        self.client().get(&Self::item_path(id)).await
    }

    /// 创建实体
    async fn create(&self, data: &Self::Create) -> Result<Self::Entity> {
        self.client().post(Self::BASE_PATH, data).await
    }

    /// 更新实体
    async fn update(&self, id: &str, data: &Self::Update) -> Result<Self::Entity> {
        self.client().put(&Self::item_path(id), data).await
    }

    /// 删除实体，忽略响应体
    async fn delete(&self, id: &str) -> Result<()> {
        let _: IgnoredAny = self.client().delete(&Self::item_path(id)).await?;
        Ok(())
    }
}
