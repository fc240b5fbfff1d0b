//! # Clinic Core
//!
//! 患者管理系统的核心模块，提供与后端交换的数据结构、错误定义、
//! 发票计费逻辑以及列表/详情视图状态。

pub mod billing;
pub mod error;
pub mod models;
pub mod view_state;

pub use billing::{round_cents, InvoiceDraft, InvoiceHeader, InvoiceTotals, DEFAULT_TAX_RATE};
pub use error::{ClinicError, Result};
pub use models::*;
pub use view_state::{DetailState, ListState};
