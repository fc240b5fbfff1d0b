use std::sync::Arc;

use chrono::NaiveDate;
use clinic_core::{
    CreateInvoice, Invoice, InvoiceStatus, PaymentRequest, StatusChange, UpdateInvoice,
};

use super::CrudService;
use crate::client::ApiClient;
use crate::error::Result;

/// 发票服务
#[derive(Debug, Clone)]
pub struct InvoiceService {
    client: Arc<ApiClient>,
}

impl InvoiceService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// 获取指定患者的发票
    pub async fn by_patient(&self, patient_id: &str) -> Result<Vec<Invoice>> {
        self.client
            .get(&format!("{}/patient/{}", Self::BASE_PATH, patient_id))
            .await
    }

    /// 按状态获取发票
    pub async fn by_status(&self, status: InvoiceStatus) -> Result<Vec<Invoice>> {
        self.client
            .get(&format!("{}/status/{}", Self::BASE_PATH, status))
            .await
    }

    /// 标记为已付款
    pub async fn mark_paid(
        &self,
        id: &str,
        payment_method: &str,
        payment_date: NaiveDate,
    ) -> Result<Invoice> {
        self.client
            .patch(
                &format!("{}/pay", Self::item_path(id)),
                &PaymentRequest::new(payment_method, payment_date),
            )
            .await
    }

    /// 取消发票
    pub async fn cancel(&self, id: &str) -> Result<Invoice> {
        self.client
            .patch(
                &format!("{}/cancel", Self::item_path(id)),
                &StatusChange {
                    status: InvoiceStatus::Cancelled,
                },
            )
            .await
    }
}

impl CrudService for InvoiceService {
    type Entity = Invoice;
    type Create = CreateInvoice;
    type Update = UpdateInvoice;

    const BASE_PATH: &'static str = "/invoices";
    const PLURAL: &'static str = "las facturas";
    const SINGULAR: &'static str = "la factura";

    fn client(&self) -> &ApiClient {
        &self.client
    }
}
