//! 服务提供者
//!
//! 构造一个共享的 [`ApiClient`] 和每种资源服务的一个实例。

use std::sync::Arc;

use tracing::info;

use crate::client::ApiClient;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::services::{
    AppointmentService, DoctorService, InvoiceService, MedicalRecordService, NotificationService,
    PatientService, TreatmentService,
};

/// 全部资源服务的集合
#[derive(Debug, Clone)]
pub struct ApiProvider {
    client: Arc<ApiClient>,
    patients: PatientService,
    appointments: AppointmentService,
    doctors: DoctorService,
    treatments: TreatmentService,
    medical_records: MedicalRecordService,
    notifications: NotificationService,
    invoices: InvoiceService,
}

impl ApiProvider {
    /// 使用指定根地址创建
    pub fn new(base_url: &str) -> Result<Self> {
        let client = ApiClient::new(base_url, None)?;
        Ok(Self::with_client(Arc::new(client)))
    }

    /// 按配置创建
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        let client = ApiClient::new(config.normalized_base_url(), config.token.as_deref())?;
        Ok(Self::with_client(Arc::new(client)))
    }

    /// 围绕已有客户端创建
    pub fn with_client(client: Arc<ApiClient>) -> Self {
        info!("API provider ready for {}", client.base_url());
        Self {
            patients: PatientService::new(client.clone()),
            appointments: AppointmentService::new(client.clone()),
            doctors: DoctorService::new(client.clone()),
            treatments: TreatmentService::new(client.clone()),
            medical_records: MedicalRecordService::new(client.clone()),
            notifications: NotificationService::new(client.clone()),
            invoices: InvoiceService::new(client.clone()),
            client,
        }
    }

    pub fn client(&self) -> &Arc<ApiClient> {
        &self.client
    }

    pub fn patients(&self) -> &PatientService {
        &self.patients
    }

    pub fn appointments(&self) -> &AppointmentService {
        &self.appointments
    }

    pub fn doctors(&self) -> &DoctorService {
        &self.doctors
    }

    pub fn treatments(&self) -> &TreatmentService {
        &self.treatments
    }

    pub fn medical_records(&self) -> &MedicalRecordService {
        &self.medical_records
    }

    pub fn notifications(&self) -> &NotificationService {
        &self.notifications
    }

    pub fn invoices(&self) -> &InvoiceService {
        &self.invoices
    }
}
