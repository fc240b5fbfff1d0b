//! # Clinic Client
//!
//! 患者管理系统后端REST API的类型化客户端，包括：
//! - 通用API客户端：统一JSON请求头、Bearer令牌和错误归一化
//! - 资源服务：患者、预约、医生、治疗、病历、通知、发票的CRUD封装
//! - 服务提供者：共享一个客户端实例的全部服务
//! - 资源存储：列表界面的加载/错误状态与本地增删改同步

pub mod client;
pub mod config;
pub mod error;
pub mod provider;
pub mod services;
pub mod store;

pub use client::{ApiClient, DEFAULT_BASE_URL};
pub use config::ClientConfig;
pub use error::{ApiError, Result};
pub use provider::ApiProvider;
pub use services::{
    AppointmentService, CrudService, DoctorService, InvoiceService, MedicalRecordService,
    NotificationService, PatientService, TreatmentService,
};
pub use store::ResourceStore;
