use std::sync::Arc;

use clinic_core::{CreateTreatment, Treatment, UpdateTreatment};

use super::CrudService;
use crate::client::ApiClient;
use crate::error::Result;

/// 治疗服务
#[derive(Debug, Clone)]
pub struct TreatmentService {
    client: Arc<ApiClient>,
}

impl TreatmentService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// 获取指定患者的治疗方案
    pub async fn by_patient(&self, patient_id: &str) -> Result<Vec<Treatment>> {
        self.client
            .get(&format!("{}/patient/{}", Self::BASE_PATH, patient_id))
            .await
    }
}

impl CrudService for TreatmentService {
    type Entity = Treatment;
    type Create = CreateTreatment;
    type Update = UpdateTreatment;

    const BASE_PATH: &'static str = "/treatments";
    const PLURAL: &'static str = "los tratamientos";
    const SINGULAR: &'static str = "el tratamiento";

    fn client(&self) -> &ApiClient {
        &self.client
    }
}
