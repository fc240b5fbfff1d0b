use std::sync::Arc;

use clinic_core::{
    CreateMedicalRecord, MedicalRecord, NewAttachment, RecordType, UpdateMedicalRecord,
};

use super::CrudService;
use crate::client::ApiClient;
use crate::error::Result;

/// 病历服务
#[derive(Debug, Clone)]
pub struct MedicalRecordService {
    client: Arc<ApiClient>,
}

impl MedicalRecordService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// 获取指定患者的病历
    pub async fn by_patient(&self, patient_id: &str) -> Result<Vec<MedicalRecord>> {
        self.client
            .get(&format!("{}/patient/{}", Self::BASE_PATH, patient_id))
            .await
    }

    /// 按记录类型获取病历
    pub async fn by_type(&self, record_type: RecordType) -> Result<Vec<MedicalRecord>> {
        self.client
            .get(&format!("{}/type/{}", Self::BASE_PATH, record_type))
            .await
    }

    /// 为病历添加附件，返回更新后的病历
    pub async fn add_attachment(
        &self,
        record_id: &str,
        attachment: &NewAttachment,
    ) -> Result<MedicalRecord> {
        self.client
            .post(&format!("{}/attachments", Self::item_path(record_id)), attachment)
            .await
    }

    /// 删除病历附件，返回更新后的病历
    pub async fn remove_attachment(
        &self,
        record_id: &str,
        attachment_id: &str,
    ) -> Result<MedicalRecord> {
        self.client
            .delete(&format!(
                "{}/attachments/{}",
                Self::item_path(record_id),
                attachment_id
            ))
            .await
    }
}

impl CrudService for MedicalRecordService {
    type Entity = MedicalRecord;
    type Create = CreateMedicalRecord;
    type Update = UpdateMedicalRecord;

    const BASE_PATH: &'static str = "/medical-records";
    const PLURAL: &'static str = "los historiales médicos";
    const SINGULAR: &'static str = "el historial médico";

    fn client(&self) -> &ApiClient {
        &self.client
    }
}
