//! Board state and key handling, kept free of terminal I/O so the
//! paging and selection rules stay unit-testable.

use crossterm::event::{KeyCode, KeyEvent};
use skycast_core::{BoardEvent, DailyForecast, Permission};

/// Screen-local state for the forecast board.
#[derive(Debug)]
pub struct Board {
    /// City label; "..." until the geocoder resolves it.
    pub city: String,
    /// False once the consent gate observed a denial. Never reset.
    pub permission: bool,
    /// The fetched forecast; absent until one successful fetch.
    pub days: Option<Vec<DailyForecast>>,
    /// Failure message from the pipeline, if any.
    pub error: Option<String>,
    /// Horizontal offset of the card region, in columns.
    pub scroll_x: u16,
    /// Selected chip in the summary strip.
    pub selected: usize,
    /// Card-region page width, in columns; written by the renderer each frame.
    pub viewport_width: u16,
}

impl Board {
    pub fn new(permission: Permission) -> Self {
        Self {
            city: "...".to_string(),
            permission: permission.granted(),
            days: None,
            error: None,
            scroll_x: 0,
            selected: 0,
            viewport_width: 0,
        }
    }

    pub fn day_count(&self) -> usize {
        self.days.as_ref().map_or(0, Vec::len)
    }

    /// Current page of the card region.
    pub fn page(&self) -> usize {
        if self.viewport_width == 0 {
            0
        } else {
            (self.scroll_x / self.viewport_width) as usize
        }
    }

    /// Apply one pipeline event.
    ///
    /// The forecast is wholesale: the first `Forecast` event wins and
    /// later ones are ignored, so the list is never partially updated.
    pub fn apply(&mut self, event: BoardEvent) {
        match event {
            BoardEvent::City(city) => self.city = city,
            BoardEvent::Forecast(days) => {
                if self.days.is_none() {
                    self.days = Some(days);
                }
            }
            BoardEvent::Failed(message) => self.error = Some(message),
        }
    }

    /// Scroll the card region to the page for chip `index`.
    pub fn scroll_to(&mut self, index: usize) {
        self.scroll_x = (index as u16).saturating_mul(self.viewport_width);
    }

    fn page_left(&mut self) {
        self.scroll_x = self.scroll_x.saturating_sub(self.viewport_width);
    }

    fn page_right(&mut self) {
        let last = self.day_count().saturating_sub(1) as u16;
        let max = last.saturating_mul(self.viewport_width);
        self.scroll_x = self
            .scroll_x
            .saturating_add(self.viewport_width)
            .min(max);
    }

    fn select_next(&mut self) {
        let count = self.day_count();
        if count == 0 {
            return;
        }
        self.selected = (self.selected + 1) % count;
    }

    fn select_prev(&mut self) {
        let count = self.day_count();
        if count == 0 {
            return;
        }
        self.selected = (self.selected + count - 1) % count;
    }
}

/// Handle one key event. Returns false when the board should close.
pub fn handle_key_event(board: &mut Board, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return false,
        KeyCode::Left | KeyCode::Char('h') => board.page_left(),
        KeyCode::Right | KeyCode::Char('l') => board.page_right(),
        KeyCode::Tab => board.select_next(),
        KeyCode::BackTab => board.select_prev(),
        KeyCode::Enter => {
            let index = board.selected;
            if index < board.day_count() {
                board.scroll_to(index);
            }
        }
        _ => {}
    }

    true
}

#[cfg(test)]
mod tests {
    use super::{Board, handle_key_event};
    use chrono::DateTime;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use skycast_core::{BoardEvent, DailyForecast, Permission};

    fn day(ts: i64, temp: f64) -> DailyForecast {
        DailyForecast {
            timestamp: DateTime::from_timestamp(ts, 0).expect("in-range timestamp"),
            temp_day_c: temp,
            category: "Clear".to_string(),
            description: "clear sky".to_string(),
        }
    }

    fn board_with_days(count: usize) -> Board {
        let mut board = Board::new(Permission::Granted);
        board.viewport_width = 80;
        board.apply(BoardEvent::Forecast(
            (0..count).map(|i| day(1672704000 + i as i64 * 86_400, 20.0)).collect(),
        ));
        board
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn new_board_starts_with_placeholder_city_and_no_forecast() {
        let board = Board::new(Permission::Granted);
        assert_eq!(board.city, "...");
        assert!(board.permission);
        assert!(board.days.is_none());
    }

    #[test]
    fn denied_permission_is_recorded() {
        let board = Board::new(Permission::Denied);
        assert!(!board.permission);
    }

    #[test]
    fn city_event_overwrites_placeholder() {
        let mut board = Board::new(Permission::Granted);
        board.apply(BoardEvent::City("Kyiv".to_string()));
        assert_eq!(board.city, "Kyiv");
    }

    #[test]
    fn forecast_is_set_at_most_once() {
        let mut board = board_with_days(3);
        board.apply(BoardEvent::Forecast(vec![day(0, -5.0)]));

        assert_eq!(board.day_count(), 3, "a second forecast must be ignored");
    }

    #[test]
    fn chip_activation_scrolls_by_index_times_viewport_width() {
        let mut board = board_with_days(7);

        for i in 0..7 {
            board.selected = i;
            handle_key_event(&mut board, key(KeyCode::Enter));
            assert_eq!(board.scroll_x, i as u16 * 80);
            assert_eq!(board.page(), i);
        }
    }

    #[test]
    fn paging_clamps_at_both_ends() {
        let mut board = board_with_days(3);

        handle_key_event(&mut board, key(KeyCode::Left));
        assert_eq!(board.scroll_x, 0);

        for _ in 0..10 {
            handle_key_event(&mut board, key(KeyCode::Right));
        }
        assert_eq!(board.scroll_x, 2 * 80);
        assert_eq!(board.page(), 2);
    }

    #[test]
    fn tab_cycles_chip_selection() {
        let mut board = board_with_days(3);

        handle_key_event(&mut board, key(KeyCode::Tab));
        assert_eq!(board.selected, 1);

        handle_key_event(&mut board, key(KeyCode::BackTab));
        handle_key_event(&mut board, key(KeyCode::BackTab));
        assert_eq!(board.selected, 2, "selection wraps backwards");
    }

    #[test]
    fn selection_keys_are_inert_without_a_forecast() {
        let mut board = Board::new(Permission::Granted);
        board.viewport_width = 80;

        handle_key_event(&mut board, key(KeyCode::Tab));
        handle_key_event(&mut board, key(KeyCode::Enter));
        assert_eq!(board.selected, 0);
        assert_eq!(board.scroll_x, 0);
    }

    #[test]
    fn quit_keys_exit() {
        let mut board = board_with_days(2);

        assert!(!handle_key_event(&mut board, key(KeyCode::Char('q'))));
        assert!(!handle_key_event(&mut board, key(KeyCode::Esc)));
        assert!(handle_key_event(&mut board, key(KeyCode::Right)));
    }
}
