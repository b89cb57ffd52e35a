use macroquad::prelude::*;

/// Dropdown selector for the pattern library.
#[derive(Clone)]
pub struct Dropdown {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    items: Vec<String>,
    selected: usize,
    is_open: bool,
    label: String,
}

impl Dropdown {
    pub fn new(x: f32, y: f32, width: f32, label: impl Into<String>, items: Vec<String>) -> Self {
        Self {
            x,
            y,
            width,
            height: 30.0,
            items,
            selected: 0,
            is_open: false,
            label: label.into(),
        }
    }

    /// Get currently selected index
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Check if the menu is open
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Update position for responsive layout
    pub fn set_position(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }

    /// Draw dropdown without handling interaction
    pub fn draw(&self, mouse_pos: (f32, f32)) {
        draw_text(&self.label, self.x, self.y - 5.0, 14.0, GRAY);

        let button_color = if self.is_hovered_main(mouse_pos) {
            Color::from_rgba(100, 149, 237, 255)
        } else {
            Color::from_rgba(70, 130, 180, 255)
        };
        draw_rectangle(self.x, self.y, self.width, self.height, button_color);
        draw_rectangle_lines(self.x, self.y, self.width, self.height, 2.0, WHITE);
        draw_text(&self.items[self.selected], self.x + 5.0, self.y + 21.0, 16.0, WHITE);
        draw_text("v", self.x + self.width - 18.0, self.y + 21.0, 14.0, WHITE);

        if self.is_open {
            let menu_height = self.items.len() as f32 * self.height;
            draw_rectangle(
                self.x,
                self.y + self.height,
                self.width,
                menu_height,
                Color::from_rgba(30, 30, 30, 255),
            );

            for (i, item) in self.items.iter().enumerate() {
                let item_y = self.y + self.height + (i as f32 * self.height);
                let item_color = if self.is_hovered_item(mouse_pos, i) {
                    Color::from_rgba(100, 149, 237, 255)
                } else if i == self.selected {
                    Color::from_rgba(50, 100, 150, 255)
                } else {
                    Color::from_rgba(45, 45, 45, 255)
                };
                draw_rectangle(self.x, item_y, self.width, self.height, item_color);
                draw_rectangle_lines(
                    self.x,
                    item_y,
                    self.width,
                    self.height,
                    1.0,
                    Color::from_rgba(80, 80, 80, 255),
                );
                draw_text(item, self.x + 5.0, item_y + 21.0, 16.0, WHITE);
            }

            draw_rectangle_lines(self.x, self.y + self.height, self.width, menu_height, 2.0, WHITE);
        }
    }

    /// Handle interaction and return true if selection changed.
    /// Callers that dispatch the same press elsewhere must consult
    /// `wants_pointer` (or `is_open`) *before* this call: selecting an
    /// item closes the menu, and the press that did it is spent.
    pub fn update(&mut self, mouse_pos: (f32, f32), pressed: bool) -> bool {
        if self.is_hovered_main(mouse_pos) && pressed {
            self.is_open = !self.is_open;
            return false;
        }

        if self.is_open && pressed {
            for i in 0..self.items.len() {
                if self.is_hovered_item(mouse_pos, i) {
                    self.is_open = false;
                    // Re-selecting the same pattern still counts: it reloads
                    self.selected = i;
                    return true;
                }
            }
            self.is_open = false;
        }

        false
    }

    fn is_hovered_main(&self, mouse_pos: (f32, f32)) -> bool {
        mouse_pos.0 >= self.x
            && mouse_pos.0 <= self.x + self.width
            && mouse_pos.1 >= self.y
            && mouse_pos.1 <= self.y + self.height
    }

    fn is_hovered_item(&self, mouse_pos: (f32, f32), index: usize) -> bool {
        let item_y = self.y + self.height + (index as f32 * self.height);
        mouse_pos.0 >= self.x
            && mouse_pos.0 <= self.x + self.width
            && mouse_pos.1 >= item_y
            && mouse_pos.1 <= item_y + self.height
    }

    /// Pointer presses inside the open menu must not fall through to the
    /// grid or buttons underneath.
    pub fn wants_pointer(&self, mouse_pos: (f32, f32)) -> bool {
        if self.is_hovered_main(mouse_pos) {
            return true;
        }
        self.is_open
            && (0..self.items.len()).any(|i| self.is_hovered_item(mouse_pos, i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dropdown() -> Dropdown {
        Dropdown::new(
            0.0,
            30.0,
            180.0,
            "Pattern",
            vec!["A".to_string(), "B".to_string(), "C".to_string()],
        )
    }

    #[test]
    fn test_press_on_header_opens_without_selecting() {
        let mut dd = dropdown();
        assert!(!dd.update((10.0, 45.0), true));
        assert!(dd.is_open());
        assert_eq!(dd.selected(), 0);
    }

    #[test]
    fn test_open_menu_claims_press_before_it_closes() {
        let mut dd = dropdown();
        dd.update((10.0, 45.0), true);

        // Item 2 sits at y = 120..150, where a panel button lives too.
        // The frame loop checks wants_pointer before update, so the press
        // that selects the item never reaches the button underneath.
        let pos = (10.0, 135.0);
        assert!(dd.wants_pointer(pos));
        assert!(dd.update(pos, true));
        assert_eq!(dd.selected(), 2);
        assert!(!dd.is_open());
    }

    #[test]
    fn test_press_outside_closes_without_selecting() {
        let mut dd = dropdown();
        dd.update((10.0, 45.0), true);
        assert!(!dd.update((500.0, 500.0), true));
        assert!(!dd.is_open());
        assert_eq!(dd.selected(), 0);
    }

    #[test]
    fn test_hover_without_press_is_inert() {
        let mut dd = dropdown();
        assert!(!dd.update((10.0, 45.0), false));
        assert!(!dd.is_open());
        assert!(dd.wants_pointer((10.0, 45.0)));
    }
}
