//! 选中项与其明细记录
//!
//! 每次选中 / 取消选中都会推进代数 (generation)。明细请求携带发起时的
//! `DetailTicket`，结果只有在代数仍然一致时才会被应用，过期的响应直接丢弃。

/// 明细请求凭据
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetailTicket {
    generation: u64,
    item_id: i64,
}

impl DetailTicket {
    pub fn item_id(&self) -> i64 {
        self.item_id
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Selection<T, D> {
    generation: u64,
    item: Option<T>,
    details: Vec<D>,
    loading: bool,
}

impl<T, D> Default for Selection<T, D> {
    fn default() -> Self {
        Self {
            generation: 0,
            item: None,
            details: Vec::new(),
            loading: false,
        }
    }
}

impl<T, D> Selection<T, D> {
    pub fn item(&self) -> Option<&T> {
        self.item.as_ref()
    }

    pub fn details(&self) -> &[D] {
        &self.details
    }

    /// 明细请求是否仍在进行
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// 选中一项，旧明细立即清空
    pub fn select(&mut self, item: T, item_id: i64) -> DetailTicket {
        self.generation += 1;
        self.item = Some(item);
        self.details.clear();
        self.loading = true;
        DetailTicket {
            generation: self.generation,
            item_id,
        }
    }

    /// 取消选中，之前发出的请求全部作废
    pub fn clear(&mut self) {
        self.generation += 1;
        self.item = None;
        self.details.clear();
        self.loading = false;
    }

    /// 替换选中项的数据 (集合重新加载后)，不影响明细和代数
    pub fn refresh_item(&mut self, item: T) {
        if self.item.is_some() {
            self.item = Some(item);
        }
    }

    /// 应用明细结果，凭据过期时返回 `false`
    pub fn apply(&mut self, ticket: DetailTicket, details: Vec<D>) -> bool {
        if ticket.generation != self.generation || self.item.is_none() {
            return false;
        }
        self.details = details;
        self.loading = false;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn applies_current_ticket() {
        let mut sel: Selection<&str, u32> = Selection::default();
        let ticket = sel.select("algebra", 1);
        assert!(sel.is_loading());

        assert!(sel.apply(ticket, vec![10, 11]));
        assert_eq!(sel.details(), &[10, 11]);
        assert!(!sel.is_loading());
        assert_eq!(ticket.item_id(), 1);
    }

    #[test]
    fn superseded_ticket_is_ignored() {
        let mut sel: Selection<&str, u32> = Selection::default();
        let first = sel.select("algebra", 1);
        let second = sel.select("biology", 2);

        assert!(sel.apply(second, vec![20]));
        assert!(!sel.apply(first, vec![10]));
        assert_eq!(sel.item(), Some(&"biology"));
        assert_eq!(sel.details(), &[20]);
    }

    #[test]
    fn clear_invalidates_in_flight_request() {
        let mut sel: Selection<&str, u32> = Selection::default();
        let ticket = sel.select("algebra", 1);
        sel.clear();

        assert!(!sel.apply(ticket, vec![10]));
        assert_eq!(sel.item(), None);
        assert!(sel.details().is_empty());
        assert!(!sel.is_loading());
    }

    #[test]
    fn reselecting_same_item_clears_old_details_first() {
        let mut sel: Selection<&str, u32> = Selection::default();
        let ticket = sel.select("algebra", 1);
        sel.apply(ticket, vec![10]);

        let again = sel.select("algebra", 1);
        assert!(sel.details().is_empty());
        assert_ne!(ticket.generation(), again.generation());
    }
}
