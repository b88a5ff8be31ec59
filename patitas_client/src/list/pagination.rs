/// Most page buttons shown at once.
pub const PAGE_WINDOW: usize = 5;

/// What a pagination control renders for one list state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationView {
    pub current_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub start_item: usize,
    pub end_item: usize,
    pub page_buttons: Vec<usize>,
    pub has_previous: bool,
    pub has_next: bool,
}

impl PaginationView {
    pub fn is_empty(&self) -> bool {
        self.total_pages == 0
    }

    /// Target of the previous control, `None` when it is disabled.
    pub fn previous_page(&self) -> Option<usize> {
        if self.has_previous {
            Some(self.current_page - 1)
        } else {
            None
        }
    }

    pub fn next_page(&self) -> Option<usize> {
        if self.has_next {
            Some(self.current_page + 1)
        } else {
            None
        }
    }
}

pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    (total_items + page_size - 1) / page_size
}

/// Buttons around `current_page`, a window of at most [`PAGE_WINDOW`]
/// pages that never leaves `1..=total_pages`.
pub fn page_buttons(current_page: usize, total_pages: usize) -> Vec<usize> {
    if total_pages <= PAGE_WINDOW {
        return (1..=total_pages).collect();
    }
    let current = current_page.clamp(1, total_pages);
    let start = current
        .saturating_sub(PAGE_WINDOW / 2)
        .clamp(1, total_pages - PAGE_WINDOW + 1);
    (start..start + PAGE_WINDOW).collect()
}

pub fn derive_pagination_view(
    current_page: usize,
    total_items: usize,
    page_size: usize,
) -> PaginationView {
    let total_pages = total_pages(total_items, page_size);
    if total_pages == 0 {
        return PaginationView::default();
    }
    let current_page = current_page.max(1);
    PaginationView {
        current_page,
        total_pages,
        total_items,
        start_item: (current_page - 1) * page_size + 1,
        end_item: (current_page * page_size).min(total_items),
        page_buttons: page_buttons(current_page, total_pages),
        has_previous: current_page > 1,
        has_next: current_page < total_pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_range() {
        let view = derive_pagination_view(3, 47, 10);
        assert_eq!(view.start_item, 21);
        assert_eq!(view.end_item, 30);
        assert_eq!(view.total_pages, 5);
        assert_eq!(view.page_buttons, vec![1, 2, 3, 4, 5]);

        let view = derive_pagination_view(5, 47, 10);
        assert_eq!((view.start_item, view.end_item), (41, 47));
        assert!(view.has_previous);
        assert!(!view.has_next);
        assert_eq!(view.next_page(), None);
        assert_eq!(view.previous_page(), Some(4));
    }

    #[test]
    fn test_window_clamp() {
        assert_eq!(page_buttons(12, 12), vec![8, 9, 10, 11, 12]);
        assert_eq!(page_buttons(11, 12), vec![8, 9, 10, 11, 12]);
        assert_eq!(page_buttons(1, 12), vec![1, 2, 3, 4, 5]);
        assert_eq!(page_buttons(2, 12), vec![1, 2, 3, 4, 5]);
        assert_eq!(page_buttons(6, 12), vec![4, 5, 6, 7, 8]);
        assert_eq!(page_buttons(40, 12), vec![8, 9, 10, 11, 12]);
        assert_eq!(page_buttons(3, 4), vec![1, 2, 3, 4]);
        for total in 6..30 {
            for current in 1..=total {
                let buttons = page_buttons(current, total);
                assert_eq!(buttons.len(), PAGE_WINDOW);
                assert!(buttons.contains(&current));
                assert!(buttons[0] >= 1 && buttons[PAGE_WINDOW - 1] <= total);
            }
        }
    }

    #[test]
    fn test_empty_list() {
        let view = derive_pagination_view(1, 0, 10);
        assert!(view.is_empty());
        assert!(view.page_buttons.is_empty());
        assert_eq!(view.previous_page(), None);
        assert_eq!(view.next_page(), None);
        assert_eq!((view.start_item, view.end_item), (0, 0));
    }

    #[test]
    fn test_single_page() {
        let view = derive_pagination_view(1, 7, 25);
        assert_eq!(view.total_pages, 1);
        assert_eq!((view.start_item, view.end_item), (1, 7));
        assert_eq!(view.page_buttons, vec![1]);
        assert!(!view.has_previous && !view.has_next);
    }
}
