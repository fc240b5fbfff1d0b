use std::sync::Arc;

use clinic_core::{CreateDoctor, Doctor, UpdateDoctor};

use super::CrudService;
use crate::client::ApiClient;
use crate::error::Result;

/// 医生服务
#[derive(Debug, Clone)]
pub struct DoctorService {
    client: Arc<ApiClient>,
}

impl DoctorService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// 按专科获取医生
    pub async fn by_speciality(&self, speciality: &str) -> Result<Vec<Doctor>> {
        self.client
            .get(&format!("{}/speciality/{}", Self::BASE_PATH, speciality))
            .await
    }
}

impl CrudService for DoctorService {
    type Entity = Doctor;
    type Create = CreateDoctor;
    type Update = UpdateDoctor;

    const BASE_PATH: &'static str = "/doctors";
    const PLURAL: &'static str = "los doctores";
    const SINGULAR: &'static str = "el doctor";

    fn client(&self) -> &ApiClient {
        &self.client
    }
}
