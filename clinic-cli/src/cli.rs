//! 命令行参数定义

use clap::{Args, Parser, Subcommand};

/// 患者管理系统命令行参数
#[derive(Parser, Debug)]
#[command(name = "clinic")]
#[command(about = "患者管理系统后端API命令行客户端")]
pub struct Cli {
    /// 后端API根地址（覆盖配置文件和环境变量）
    #[arg(short, long, global = true)]
    pub base_url: Option<String>,

    /// Bearer令牌
    #[arg(short, long, global = true)]
    pub token: Option<String>,

    /// 配置文件路径
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// 日志级别
    #[arg(short, long, global = true, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// 患者
    #[command(subcommand)]
    Patients(PatientCommand),
    /// 预约
    #[command(subcommand)]
    Appointments(AppointmentCommand),
    /// 医生
    #[command(subcommand)]
    Doctors(DoctorCommand),
    /// 治疗方案
    #[command(subcommand)]
    Treatments(TreatmentCommand),
    /// 病历
    #[command(subcommand)]
    Records(RecordCommand),
    /// 通知
    #[command(subcommand)]
    Notifications(NotificationCommand),
    /// 发票
    #[command(subcommand)]
    Invoices(InvoiceCommand),
}

/// 所有资源共有的操作
#[derive(Subcommand, Debug)]
pub enum CommonCommand {
    /// 按ID获取
    Get { id: String },
    /// 按JSON创建（文件路径，`-` 表示标准输入）
    Create {
        #[arg(long)]
        json: String,
    },
    /// 按JSON更新
    Update {
        id: String,
        #[arg(long)]
        json: String,
    },
    /// 删除
    Delete { id: String },
}

#[derive(Args, Debug)]
pub struct PatientFilter {
    /// 只列出指定患者的数据
    #[arg(long)]
    pub patient: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum PatientCommand {
    /// 列出全部患者
    List,
    #[command(flatten)]
    Common(CommonCommand),
}

#[derive(Subcommand, Debug)]
pub enum AppointmentCommand {
    /// 列出预约
    List(PatientFilter),
    #[command(flatten)]
    Common(CommonCommand),
}

#[derive(Subcommand, Debug)]
pub enum DoctorCommand {
    /// 列出医生
    List {
        /// 按专科过滤
        #[arg(long)]
        speciality: Option<String>,
    },
    #[command(flatten)]
    Common(CommonCommand),
}

#[derive(Subcommand, Debug)]
pub enum TreatmentCommand {
    /// 列出治疗方案
    List(PatientFilter),
    #[command(flatten)]
    Common(CommonCommand),
}

#[derive(Subcommand, Debug)]
pub enum RecordCommand {
    /// 列出病历
    List {
        #[arg(long, conflicts_with = "record_type")]
        patient: Option<String>,
        /// 记录类型，如 consultation、follow_up
        #[arg(long = "type")]
        record_type: Option<String>,
    },
    /// 添加附件
    Attach {
        id: String,
        #[arg(long)]
        json: String,
    },
    /// 删除附件
    Detach { id: String, attachment: String },
    #[command(flatten)]
    Common(CommonCommand),
}

#[derive(Subcommand, Debug)]
pub enum NotificationCommand {
    /// 列出通知
    List {
        /// 只列出当前用户的通知
        #[arg(long)]
        mine: bool,
        /// 只列出当前用户的未读通知
        #[arg(long)]
        unread: bool,
        /// 接收者类型（patient/doctor/admin），需与 --recipient-id 一起使用
        #[arg(long, requires = "recipient_id")]
        recipient_type: Option<String>,
        #[arg(long, requires = "recipient_type")]
        recipient_id: Option<String>,
    },
    /// 标记为已读
    Read { id: String },
    /// 标记为未读
    Unread { id: String },
    /// 全部标记为已读
    ReadAll,
    /// 删除当前用户的全部通知
    DeleteAll,
    #[command(flatten)]
    Common(CommonCommand),
}

#[derive(Subcommand, Debug)]
pub enum InvoiceCommand {
    /// 列出发票
    List {
        #[arg(long, conflicts_with = "status")]
        patient: Option<String>,
        /// 发票状态，如 pending、paid
        #[arg(long)]
        status: Option<String>,
    },
    /// 标记为已付款
    Pay {
        id: String,
        /// 付款方式
        #[arg(long)]
        method: String,
        /// 付款日期（YYYY-MM-DD），默认今天
        #[arg(long)]
        date: Option<String>,
    },
    /// 取消发票
    Cancel { id: String },
    /// 离线计算发票合计
    Total {
        /// 明细行，格式 数量:单价[:描述]
        #[arg(long = "item", required = true)]
        items: Vec<String>,
        /// 税率（百分比）
        #[arg(long, default_value_t = clinic_core::DEFAULT_TAX_RATE)]
        tax_rate: f64,
    },
    #[command(flatten)]
    Common(CommonCommand),
}
