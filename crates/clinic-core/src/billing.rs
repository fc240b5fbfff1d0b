//! 发票计费
//!
//! 明细金额、小计、税额和总额的计算。所有金额结果按分（两位小数）四舍五入，
//! 避免浮点累加误差直接进入发票。

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{ClinicError, Result};
use crate::models::{CreateInvoice, Invoice, InvoiceItem, InvoiceStatus, UpdateInvoice};

/// 默认税率（百分比）
pub const DEFAULT_TAX_RATE: f64 = 16.0;

/// 四舍五入到分（远离零）
///
/// 在十进制表示上移动小数点后再取整，`1.005` 得到 `1.01`。
pub fn round_cents(value: f64) -> f64 {
    let scaled = format!("{}e2", value)
        .parse::<f64>()
        .unwrap_or(value * 100.0);
    scaled.round() / 100.0
}

fn ensure_non_negative(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(ClinicError::Validation(format!(
            "{} 必须为非负数: {}",
            field, value
        )));
    }
    Ok(())
}

fn refresh_amounts(items: &mut [InvoiceItem]) {
    for item in items {
        item.amount = round_cents(item.quantity * item.unit_price);
    }
}

impl InvoiceItem {
    /// 创建明细行，金额 = 数量 × 单价
    pub fn new(description: impl Into<String>, quantity: f64, unit_price: f64) -> Result<Self> {
        ensure_non_negative("quantity", quantity)?;
        ensure_non_negative("unitPrice", unit_price)?;

        Ok(Self {
            id: None,
            description: description.into(),
            quantity,
            unit_price,
            amount: round_cents(quantity * unit_price),
            treatment_id: None,
            appointment_id: None,
        })
    }

    /// 关联治疗方案
    pub fn for_treatment(mut self, treatment_id: impl Into<String>) -> Self {
        self.treatment_id = Some(treatment_id.into());
        self
    }

    /// 关联预约
    pub fn for_appointment(mut self, appointment_id: impl Into<String>) -> Self {
        self.appointment_id = Some(appointment_id.into());
        self
    }

    /// 修改数量和单价并重新计算金额
    pub fn reprice(&mut self, quantity: f64, unit_price: f64) -> Result<()> {
        ensure_non_negative("quantity", quantity)?;
        ensure_non_negative("unitPrice", unit_price)?;
        self.quantity = quantity;
        self.unit_price = unit_price;
        self.amount = round_cents(quantity * unit_price);
        Ok(())
    }
}

/// 发票合计
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceTotals {
    pub subtotal: f64,
    pub tax_amount: f64,
    pub total: f64,
}

impl InvoiceTotals {
    /// 小计 = Σ明细金额，税额 = 小计 × 税率 / 100，总额 = 小计 + 税额
    pub fn compute(items: &[InvoiceItem], tax_rate: f64) -> Self {
        let subtotal = round_cents(items.iter().map(|item| item.amount).sum());
        let tax_amount = round_cents(subtotal * tax_rate / 100.0);
        let total = round_cents(subtotal + tax_amount);

        Self {
            subtotal,
            tax_amount,
            total,
        }
    }
}

impl Invoice {
    /// 按当前明细（数量×单价）和税率重新计算合计
    pub fn recompute_totals(&mut self) -> InvoiceTotals {
        refresh_amounts(&mut self.items);
        let totals = InvoiceTotals::compute(&self.items, self.tax_rate);
        self.subtotal = totals.subtotal;
        self.tax_amount = totals.tax_amount;
        self.total = totals.total;
        totals
    }

    /// 后端返回的合计是否与明细一致
    pub fn totals_consistent(&self) -> bool {
        let totals = InvoiceTotals::compute(&self.items, self.tax_rate);
        round_cents(self.subtotal) == totals.subtotal
            && round_cents(self.tax_amount) == totals.tax_amount
            && round_cents(self.total) == totals.total
    }
}

impl CreateInvoice {
    /// 按明细和税率重新计算合计
    pub fn recompute_totals(&mut self) -> InvoiceTotals {
        refresh_amounts(&mut self.items);
        let totals = InvoiceTotals::compute(&self.items, self.tax_rate);
        self.subtotal = totals.subtotal;
        self.tax_amount = totals.tax_amount;
        self.total = totals.total;
        totals
    }
}

impl UpdateInvoice {
    /// 请求带有明细时重新计算合计，税率缺省时按默认税率
    ///
    /// 不带明细的部分更新保持原样，返回 `None`。
    pub fn recompute_totals(&mut self) -> Option<InvoiceTotals> {
        let items = self.items.as_mut()?;
        refresh_amounts(items.as_mut_slice());
        let tax_rate = *self.tax_rate.get_or_insert(DEFAULT_TAX_RATE);
        let totals = InvoiceTotals::compute(items.as_slice(), tax_rate);
        self.subtotal = Some(totals.subtotal);
        self.tax_amount = Some(totals.tax_amount);
        self.total = Some(totals.total);
        Some(totals)
    }
}

/// 发票抬头信息
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceHeader {
    pub patient_id: String,
    pub doctor_id: Option<String>,
    pub number: String,
    pub date: NaiveDate,
    pub due_date: NaiveDate,
    pub status: InvoiceStatus,
    pub notes: Option<String>,
}

/// 发票编辑状态
///
/// 每次修改明细或税率后立即重新计算合计。
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceDraft {
    items: Vec<InvoiceItem>,
    tax_rate: f64,
    totals: InvoiceTotals,
}

impl InvoiceDraft {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            tax_rate: DEFAULT_TAX_RATE,
            totals: InvoiceTotals::default(),
        }
    }

    /// 从已有发票载入，用于编辑
    pub fn from_invoice(invoice: &Invoice) -> Self {
        let mut draft = Self {
            items: invoice.items.clone(),
            tax_rate: invoice.tax_rate,
            totals: InvoiceTotals::default(),
        };
        draft.recompute();
        draft
    }

    pub fn items(&self) -> &[InvoiceItem] {
        &self.items
    }

    pub fn tax_rate(&self) -> f64 {
        self.tax_rate
    }

    pub fn totals(&self) -> InvoiceTotals {
        self.totals
    }

    /// 添加明细行
    pub fn add_item(&mut self, mut item: InvoiceItem) -> Result<()> {
        ensure_non_negative("quantity", item.quantity)?;
        ensure_non_negative("unitPrice", item.unit_price)?;
        item.amount = round_cents(item.quantity * item.unit_price);
        self.items.push(item);
        self.recompute();
        Ok(())
    }

    /// 修改指定明细行的数量和单价
    pub fn update_item(&mut self, index: usize, quantity: f64, unit_price: f64) -> Result<()> {
        let item = self
            .items
            .get_mut(index)
            .ok_or_else(|| ClinicError::NotFound(format!("发票明细 #{}", index)))?;
        item.reprice(quantity, unit_price)?;
        self.recompute();
        Ok(())
    }

    /// 删除指定明细行
    pub fn remove_item(&mut self, index: usize) -> Result<InvoiceItem> {
        if index >= self.items.len() {
            return Err(ClinicError::NotFound(format!("发票明细 #{}", index)));
        }
        let removed = self.items.remove(index);
        self.recompute();
        Ok(removed)
    }

    /// 修改税率（百分比）
    pub fn set_tax_rate(&mut self, tax_rate: f64) -> Result<()> {
        ensure_non_negative("taxRate", tax_rate)?;
        self.tax_rate = tax_rate;
        self.recompute();
        Ok(())
    }

    /// 生成创建发票请求
    pub fn into_create(self, header: InvoiceHeader) -> CreateInvoice {
        CreateInvoice {
            patient_id: header.patient_id,
            doctor_id: header.doctor_id,
            number: header.number,
            date: header.date,
            due_date: header.due_date,
            status: header.status,
            items: self.items,
            subtotal: self.totals.subtotal,
            tax_rate: self.tax_rate,
            tax_amount: self.totals.tax_amount,
            total: self.totals.total,
            notes: header.notes,
            payment_method: None,
            payment_date: None,
        }
    }

    /// 生成只包含明细与合计的更新请求
    pub fn to_update(&self) -> UpdateInvoice {
        UpdateInvoice {
            items: Some(self.items.clone()),
            subtotal: Some(self.totals.subtotal),
            tax_rate: Some(self.tax_rate),
            tax_amount: Some(self.totals.tax_amount),
            total: Some(self.totals.total),
            ..Default::default()
        }
    }

    fn recompute(&mut self) {
        self.totals = InvoiceTotals::compute(&self.items, self.tax_rate);
    }
}

impl Default for InvoiceDraft {
    fn default() -> Self {
        Self::new()
    }
}
