use std::sync::Arc;

use clinic_core::{CreatePatient, Patient, UpdatePatient};

use super::CrudService;
use crate::client::ApiClient;
use crate::error::Result;

/// 患者服务
#[derive(Debug, Clone)]
pub struct PatientService {
    client: Arc<ApiClient>,
}

impl PatientService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// 使用请求体中的ID更新患者
    pub async fn update_patient(&self, data: &UpdatePatient) -> Result<Patient> {
        self.update(&data.id, data).await
    }
}

impl CrudService for PatientService {
    type Entity = Patient;
    type Create = CreatePatient;
    type Update = UpdatePatient;

    const BASE_PATH: &'static str = "/patients";
    const PLURAL: &'static str = "los pacientes";
    const SINGULAR: &'static str = "el paciente";

    fn client(&self) -> &ApiClient {
        &self.client
    }
}
