//! 列表/详情视图状态
//!
//! 每个视图独立持有自己拉取的数据副本，不做跨视图缓存。

use crate::models::Identified;

/// 列表视图状态
#[derive(Debug, Clone, PartialEq)]
pub struct ListState<T> {
    pub items: Vec<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            error: None,
        }
    }
}

impl<T: Identified> ListState<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// 开始请求
    pub fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// 请求成功，替换列表
    pub fn loaded(&mut self, items: Vec<T>) {
        self.items = items;
        self.loading = false;
    }

    /// 请求结束（无论结果如何）
    pub fn settle(&mut self) {
        self.loading = false;
    }

    /// 请求失败
    pub fn failed(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        self.loading = false;
    }

    pub fn find(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// 追加新建的实体
    pub fn insert(&mut self, item: T) {
        self.items.push(item);
    }

    /// 用同ID的新版本替换，返回是否找到
    pub fn replace(&mut self, item: T) -> bool {
        match self.items.iter_mut().find(|existing| existing.id() == item.id()) {
            Some(existing) => {
                *existing = item;
                true
            }
            None => false,
        }
    }

    /// 删除指定ID的实体，不重新拉取
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id() != id);
        self.items.len() != before
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// 详情视图状态
#[derive(Debug, Clone, PartialEq)]
pub struct DetailState<T> {
    pub item: Option<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> Default for DetailState<T> {
    fn default() -> Self {
        Self {
            item: None,
            loading: false,
            error: None,
        }
    }
}

impl<T> DetailState<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub fn loaded(&mut self, item: T) {
        self.item = Some(item);
        self.loading = false;
    }

    pub fn failed(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        self.loading = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: String,
        label: &'static str,
    }

    impl Identified for Row {
        fn id(&self) -> &str {
            &self.id
        }
    }

    fn row(id: &str, label: &'static str) -> Row {
        Row {
            id: id.to_string(),
            label,
        }
    }

    #[test]
    fn test_loading_transitions() {
        let mut state: ListState<Row> = ListState::new();
        state.failed("Error al cargar los pacientes");
        assert!(!state.loading);

        state.begin();
        assert!(state.loading);
        assert!(state.error.is_none());

        state.loaded(vec![row("1", "a")]);
        assert!(!state.loading);
        assert_eq!(state.len(), 1);
    }

    #[test]
    fn test_remove_exactly_one_id() {
        let mut state = ListState::new();
        state.loaded(vec![row("1", "a"), row("2", "b"), row("3", "c")]);

        assert!(state.remove("2"));
        let ids: Vec<&str> = state.items.iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec!["1", "3"]);

        assert!(!state.remove("2"));
        assert_eq!(state.len(), 2);
    }

    #[test]
    fn test_insert_and_replace() {
        let mut state = ListState::new();
        state.insert(row("1", "a"));
        assert!(state.replace(row("1", "b")));
        assert_eq!(state.find("1").map(|r| r.label), Some("b"));
        assert!(!state.replace(row("9", "z")));
        assert_eq!(state.len(), 1);
    }

    #[test]
    fn test_detail_state() {
        let mut detail = DetailState::new();
        detail.begin();
        detail.loaded(row("7", "x"));
        assert!(!detail.loading);
        assert_eq!(detail.item.as_ref().map(|r| r.id.as_str()), Some("7"));

        detail.begin();
        detail.failed("Error al obtener el paciente con ID 7");
        assert!(detail.error.is_some());
    }
}
