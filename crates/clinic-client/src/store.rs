//! 资源存储
//!
//! 列表界面的数据层：拉取列表、单项详情，执行增删改后同步本地状态。
//! 失败时记录本地化提示并把原始错误返回给调用方，不做重试。

use clinic_core::{DetailState, ListState};
use tracing::{debug, error};

use crate::error::Result;
use crate::services::CrudService;

/// 单一资源的列表与详情状态
pub struct ResourceStore<S: CrudService> {
    service: S,
    list: ListState<S::Entity>,
    detail: DetailState<S::Entity>,
}

impl<S: CrudService> ResourceStore<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            list: ListState::default(),
            detail: DetailState::default(),
        }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn list(&self) -> &ListState<S::Entity> {
        &self.list
    }

    pub fn detail(&self) -> &DetailState<S::Entity> {
        &self.detail
    }

    pub fn items(&self) -> &[S::Entity] {
        &self.list.items
    }

    /// 拉取全部实体，替换列表
    pub async fn load(&mut self) -> Result<()> {
        self.list.begin();
        match self.service.list().await {
            Ok(items) => {
                debug!("Loaded {} items from {}", items.len(), S::BASE_PATH);
                self.list.loaded(items);
                Ok(())
            }
            Err(e) => {
                let message = format!("Error al cargar {}", S::PLURAL);
                error!("{}: {}", message, e);
                self.list.failed(message);
                Err(e)
            }
        }
    }

    /// 拉取单个实体到详情状态
    pub async fn fetch(&mut self, id: &str) -> Result<S::Entity> {
        self.detail.begin();
        match self.service.get(id).await {
            Ok(item) => {
                self.detail.loaded(item.clone());
                Ok(item)
            }
            Err(e) => {
                let message = format!("Error al obtener {} con ID {}", S::SINGULAR, id);
                error!("{}: {}", message, e);
                self.detail.failed(message);
                Err(e)
            }
        }
    }

    /// 创建实体并追加到列表
    pub async fn create(&mut self, data: &S::Create) -> Result<S::Entity> {
        self.list.begin();
        match self.service.create(data).await {
            Ok(item) => {
                self.list.insert(item.clone());
                self.list.settle();
                Ok(item)
            }
            Err(e) => {
                let message = format!("Error al crear {}", S::SINGULAR);
                error!("{}: {}", message, e);
                self.list.failed(message);
                Err(e)
            }
        }
    }

    /// 更新实体并替换列表中的同ID项
    pub async fn update(&mut self, id: &str, data: &S::Update) -> Result<S::Entity> {
        self.list.begin();
        match self.service.update(id, data).await {
            Ok(item) => {
                self.list.replace(item.clone());
                self.list.settle();
                Ok(item)
            }
            Err(e) => {
                let message = format!("Error al actualizar {} con ID {}", S::SINGULAR, id);
                error!("{}: {}", message, e);
                self.list.failed(message);
                Err(e)
            }
        }
    }

    /// 删除实体，成功后只从本地列表移除该ID，不重新拉取
    pub async fn delete(&mut self, id: &str) -> Result<()> {
        self.list.begin();
        match self.service.delete(id).await {
            Ok(()) => {
                self.list.remove(id);
                self.list.settle();
                Ok(())
            }
            Err(e) => {
                let message = format!("Error al eliminar {} con ID {}", S::SINGULAR, id);
                error!("{}: {}", message, e);
                self.list.failed(message);
                Err(e)
            }
        }
    }
}
