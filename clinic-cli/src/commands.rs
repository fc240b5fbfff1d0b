//! 命令执行

use std::io::Read;
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use clinic_client::{ApiProvider, CrudService, InvoiceService, ResourceStore};
use clinic_core::{
    CreateInvoice, InvoiceDraft, InvoiceItem, InvoiceStatus, NewAttachment, RecipientType,
    RecordType, UpdateInvoice,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::info;

use crate::cli::{
    AppointmentCommand, Command, CommonCommand, DoctorCommand, InvoiceCommand,
    NotificationCommand, PatientCommand, RecordCommand, TreatmentCommand,
};

/// 执行命令，返回要输出的JSON
pub async fn execute(provider: &ApiProvider, command: Command) -> Result<Value> {
    match command {
        Command::Patients(cmd) => match cmd {
            PatientCommand::List => load_all(provider.patients()).await,
            PatientCommand::Common(common) => run_common(provider.patients(), common).await,
        },
        Command::Appointments(cmd) => match cmd {
            AppointmentCommand::List(filter) => match filter.patient {
                Some(patient) => to_json(provider.appointments().by_patient(&patient).await?),
                None => load_all(provider.appointments()).await,
            },
            AppointmentCommand::Common(common) => {
                run_common(provider.appointments(), common).await
            }
        },
        Command::Doctors(cmd) => match cmd {
            DoctorCommand::List { speciality } => match speciality {
                Some(speciality) => {
                    to_json(provider.doctors().by_speciality(&speciality).await?)
                }
                None => load_all(provider.doctors()).await,
            },
            DoctorCommand::Common(common) => run_common(provider.doctors(), common).await,
        },
        Command::Treatments(cmd) => match cmd {
            TreatmentCommand::List(filter) => match filter.patient {
                Some(patient) => to_json(provider.treatments().by_patient(&patient).await?),
                None => load_all(provider.treatments()).await,
            },
            TreatmentCommand::Common(common) => run_common(provider.treatments(), common).await,
        },
        Command::Records(cmd) => execute_records(provider, cmd).await,
        Command::Notifications(cmd) => execute_notifications(provider, cmd).await,
        Command::Invoices(cmd) => execute_invoices(provider.invoices(), cmd).await,
    }
}

async fn execute_records(provider: &ApiProvider, cmd: RecordCommand) -> Result<Value> {
    let records = provider.medical_records();
    match cmd {
        RecordCommand::List {
            patient,
            record_type,
        } => match (patient, record_type) {
            (Some(patient), _) => to_json(records.by_patient(&patient).await?),
            (None, Some(record_type)) => {
                let record_type = RecordType::from_str(&record_type)?;
                to_json(records.by_type(record_type).await?)
            }
            (None, None) => load_all(records).await,
        },
        RecordCommand::Attach { id, json } => {
            let attachment: NewAttachment = read_json(&json)?;
            to_json(records.add_attachment(&id, &attachment).await?)
        }
        RecordCommand::Detach { id, attachment } => {
            to_json(records.remove_attachment(&id, &attachment).await?)
        }
        RecordCommand::Common(common) => run_common(records, common).await,
    }
}

async fn execute_notifications(provider: &ApiProvider, cmd: NotificationCommand) -> Result<Value> {
    let notifications = provider.notifications();
    match cmd {
        NotificationCommand::List {
            mine,
            unread,
            recipient_type,
            recipient_id,
        } => {
            if let (Some(recipient_type), Some(recipient_id)) = (recipient_type, recipient_id) {
                let recipient_type = RecipientType::from_str(&recipient_type)?;
                to_json(notifications.by_recipient(recipient_type, &recipient_id).await?)
            } else if unread {
                to_json(notifications.mine_unread().await?)
            } else if mine {
                to_json(notifications.mine().await?)
            } else {
                load_all(notifications).await
            }
        }
        NotificationCommand::Read { id } => to_json(notifications.mark_read(&id).await?),
        NotificationCommand::Unread { id } => to_json(notifications.mark_unread(&id).await?),
        NotificationCommand::ReadAll => {
            notifications.mark_all_read().await?;
            Ok(json!({ "read": true }))
        }
        NotificationCommand::DeleteAll => {
            notifications.delete_all().await?;
            Ok(json!({ "deleted": "all" }))
        }
        NotificationCommand::Common(common) => run_common(notifications, common).await,
    }
}

async fn execute_invoices(invoices: &InvoiceService, cmd: InvoiceCommand) -> Result<Value> {
    match cmd {
        InvoiceCommand::List { patient, status } => match (patient, status) {
            (Some(patient), _) => to_json(invoices.by_patient(&patient).await?),
            (None, Some(status)) => {
                let status = InvoiceStatus::from_str(&status)?;
                to_json(invoices.by_status(status).await?)
            }
            (None, None) => load_all(invoices).await,
        },
        InvoiceCommand::Pay { id, method, date } => {
            let date = match date {
                Some(date) => NaiveDate::parse_from_str(&date, "%Y-%m-%d")
                    .with_context(|| format!("无效的付款日期: {}", date))?,
                None => chrono::Local::now().date_naive(),
            };
            to_json(invoices.mark_paid(&id, &method, date).await?)
        }
        InvoiceCommand::Cancel { id } => to_json(invoices.cancel(&id).await?),
        InvoiceCommand::Total { items, tax_rate } => {
            let mut draft = InvoiceDraft::new();
            draft.set_tax_rate(tax_rate)?;
            for spec in &items {
                draft.add_item(parse_item(spec)?)?;
            }
            Ok(json!({
                "items": draft.items(),
                "taxRate": draft.tax_rate(),
                "totals": draft.totals(),
            }))
        }
        InvoiceCommand::Common(CommonCommand::Create { json }) => {
            let mut invoice: CreateInvoice = read_json(&json)?;
            let totals = invoice.recompute_totals();
            info!("Invoice totals recomputed: total {:.2}", totals.total);
            to_json(invoices.create(&invoice).await?)
        }
        InvoiceCommand::Common(CommonCommand::Update { id, json }) => {
            let update = recompute_update(read_json(&json)?);
            to_json(invoices.update(&id, &update).await?)
        }
        InvoiceCommand::Common(common) => run_common(invoices, common).await,
    }
}

/// 更新请求带有明细时，按明细重新计算合计
fn recompute_update(mut update: UpdateInvoice) -> UpdateInvoice {
    if let Some(totals) = update.recompute_totals() {
        info!("Invoice totals recomputed: total {:.2}", totals.total);
    }
    update
}

/// 通过列表存储拉取全部实体
async fn load_all<S>(service: &S) -> Result<Value>
where
    S: CrudService + Clone,
    S::Entity: Serialize,
{
    let mut store = ResourceStore::new(service.clone());
    store.load().await?;
    info!("Fetched {} items from {}", store.items().len(), S::BASE_PATH);
    to_json(store.items())
}

/// 执行通用CRUD操作
async fn run_common<S>(service: &S, command: CommonCommand) -> Result<Value>
where
    S: CrudService,
    S::Entity: Serialize,
    S::Create: DeserializeOwned,
    S::Update: DeserializeOwned,
{
    match command {
        CommonCommand::Get { id } => to_json(service.get(&id).await?),
        CommonCommand::Create { json } => {
            let data: S::Create = read_json(&json)?;
            to_json(service.create(&data).await?)
        }
        CommonCommand::Update { id, json } => {
            let data: S::Update = read_json(&json)?;
            to_json(service.update(&id, &data).await?)
        }
        CommonCommand::Delete { id } => {
            service.delete(&id).await?;
            Ok(json!({ "deleted": id }))
        }
    }
}

/// 解析 数量:单价[:描述] 格式的明细行
fn parse_item(spec: &str) -> Result<InvoiceItem> {
    let mut parts = spec.splitn(3, ':');
    let quantity = parts
        .next()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| anyhow!("缺少数量: {}", spec))?
        .trim()
        .parse::<f64>()
        .with_context(|| format!("无效的数量: {}", spec))?;
    let unit_price = parts
        .next()
        .ok_or_else(|| anyhow!("缺少单价: {}", spec))?
        .trim()
        .parse::<f64>()
        .with_context(|| format!("无效的单价: {}", spec))?;
    let description = parts.next().unwrap_or("").trim();

    Ok(InvoiceItem::new(description, quantity, unit_price)?)
}

/// 从文件或标准输入读取JSON
fn read_json<T: DeserializeOwned>(source: &str) -> Result<T> {
    let content = if source == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("读取标准输入失败")?;
        buffer
    } else {
        std::fs::read_to_string(source).with_context(|| format!("读取文件失败: {}", source))?
    };

    serde_json::from_str(&content).with_context(|| format!("JSON格式错误: {}", source))
}

fn to_json<T: Serialize>(value: T) -> Result<Value> {
    Ok(serde_json::to_value(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_item() {
        let item = parse_item("2:500:Consulta general").unwrap();
        assert_eq!(item.quantity, 2.0);
        assert_eq!(item.unit_price, 500.0);
        assert_eq!(item.amount, 1000.0);
        assert_eq!(item.description, "Consulta general");

        let item = parse_item("1.5:80").unwrap();
        assert_eq!(item.amount, 120.0);
        assert!(item.description.is_empty());
    }

    #[test]
    fn test_parse_item_rejects_garbage() {
        assert!(parse_item("").is_err());
        assert!(parse_item("dos:500").is_err());
        assert!(parse_item("2").is_err());
        assert!(parse_item("-1:500").is_err());
    }

    #[tokio::test]
    async fn test_offline_total() {
        let provider = ApiProvider::new(clinic_client::DEFAULT_BASE_URL).unwrap();
        let output = execute_invoices(
            provider.invoices(),
            InvoiceCommand::Total {
                items: vec!["2:500:Consulta".to_string()],
                tax_rate: 16.0,
            },
        )
        .await
        .unwrap();

        assert_eq!(output["totals"]["subtotal"], 1000.0);
        assert_eq!(output["totals"]["taxAmount"], 160.0);
        assert_eq!(output["totals"]["total"], 1160.0);
    }

    #[test]
    fn test_invoice_update_totals_follow_items() {
        let update: UpdateInvoice = serde_json::from_value(json!({
            "items": [
                { "description": "Consulta", "quantity": 2, "unitPrice": 500, "amount": 0 }
            ],
            "taxRate": 16,
            "subtotal": 5,
            "taxAmount": 5,
            "total": 5,
            "paymentMethod": "efectivo"
        }))
        .unwrap();

        let update = recompute_update(update);
        assert_eq!(update.subtotal, Some(1000.0));
        assert_eq!(update.tax_amount, Some(160.0));
        assert_eq!(update.total, Some(1160.0));
        assert_eq!(update.payment_method.as_deref(), Some("efectivo"));

        let status_only = recompute_update(UpdateInvoice {
            status: Some(InvoiceStatus::Cancelled),
            ..Default::default()
        });
        assert_eq!(status_only.total, None);
    }
}
