use std::sync::Arc;

use clinic_core::{Appointment, CreateAppointment, UpdateAppointment};

use super::CrudService;
use crate::client::ApiClient;
use crate::error::Result;

/// 预约服务
#[derive(Debug, Clone)]
pub struct AppointmentService {
    client: Arc<ApiClient>,
}

impl AppointmentService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// 获取指定患者的预约
    pub async fn by_patient(&self, patient_id: &str) -> Result<Vec<Appointment>> {
        self.client
            .get(&format!("{}/patient/{}", Self::BASE_PATH, patient_id))
            .await
    }

    /// 使用请求体中的ID更新预约
    pub async fn update_appointment(&self, data: &UpdateAppointment) -> Result<Appointment> {
        self.update(&data.id, data).await
    }
}

impl CrudService for AppointmentService {
    type Entity = Appointment;
    type Create = CreateAppointment;
    type Update = UpdateAppointment;

    const BASE_PATH: &'static str = "/appointments";
    const PLURAL: &'static str = "las citas";
    const SINGULAR: &'static str = "la cita";

    fn client(&self) -> &ApiClient {
        &self.client
    }
}
