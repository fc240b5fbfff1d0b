//! 核心数据模型定义
//!
//! 所有实体均由外部后端持有和持久化，这里只描述与后端交换的JSON结构。
//! 线上字段名为camelCase，可选字段为空时不序列化。

/// 定义一个取值封闭、按线上拼写序列化的枚举
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($(#[$vmeta:meta])* $variant:ident => $wire:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ::serde::Serialize, ::serde::Deserialize)]
        pub enum $name {
            $($(#[$vmeta])* #[serde(rename = $wire)] $variant,)+
        }

        impl $name {
            /// 全部取值，按声明顺序
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];

            /// 线上拼写
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::ClinicError;

            fn from_str(value: &str) -> $crate::Result<Self> {
                match value {
                    $($wire => Ok($name::$variant),)+
                    _ => Err($crate::ClinicError::Validation(format!(
                        "未知的{}取值: {}",
                        stringify!($name),
                        value
                    ))),
                }
            }
        }
    };
}

mod appointment;
mod doctor;
mod invoice;
mod medical_record;
mod notification;
mod patient;
mod treatment;
pub mod wire_date;

pub use appointment::*;
pub use doctor::*;
pub use invoice::*;
pub use medical_record::*;
pub use notification::*;
pub use patient::*;
pub use treatment::*;

/// 带有后端分配ID的实体
pub trait Identified {
    fn id(&self) -> &str;
}
