use crate::airports::Airport;

/// Longest input the code field accepts.
pub const MAX_CODE_LEN: usize = 3;

/// Filter the directory for a partial query.
///
/// Codes, cities and countries match on prefix, full names match anywhere.
/// Matching ignores case. An empty query yields the whole directory, in order.
pub fn filter<'a>(query: &str, directory: &'a [Airport]) -> Vec<&'a Airport> {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return directory.iter().collect();
    }

    directory
        .iter()
        .filter(|a| {
            a.code.to_lowercase().starts_with(&q)
                || a.city.to_lowercase().starts_with(&q)
                || a.country.to_lowercase().starts_with(&q)
                || a.name.to_lowercase().contains(&q)
        })
        .collect()
}

/// Normalize typed input the way the code field does: upper-case, at most three characters.
pub fn normalize_input(raw: &str) -> String {
    raw.chars().take(MAX_CODE_LEN).collect::<String>().to_uppercase()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowDown,
    ArrowUp,
    Enter,
    Escape,
}

/// Dropdown state behind an airport input.
#[derive(Debug, Clone)]
pub struct Suggestions {
    items: Vec<Airport>,
    highlighted: Option<usize>,
    open: bool,
}

impl Suggestions {
    pub fn new(directory: &[Airport]) -> Self {
        Self {
            items: directory.to_vec(),
            highlighted: None,
            open: false,
        }
    }

    pub fn items(&self) -> &[Airport] {
        &self.items
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Re-filter after the input changed. Typing always opens the dropdown.
    pub fn update(&mut self, query: &str, directory: &[Airport]) {
        self.items = filter(query, directory).into_iter().copied().collect();
        self.highlighted = None;
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
        self.highlighted = None;
    }

    /// Handle a navigation key. Returns the selected code on Enter.
    pub fn handle_key(&mut self, key: Key) -> Option<&'static str> {
        if !self.open {
            if key == Key::ArrowDown {
                self.open = true;
            }
            return None;
        }

        let len = self.items.len();
        match key {
            Key::ArrowDown if len > 0 => {
                self.highlighted = Some(match self.highlighted {
                    Some(i) if i + 1 < len => i + 1,
                    _ => 0,
                });
            }
            Key::ArrowUp if len > 0 => {
                self.highlighted = Some(match self.highlighted {
                    Some(i) if i > 0 => i - 1,
                    _ => len - 1,
                });
            }
            Key::Enter => {
                if let Some(airport) = self.highlighted.and_then(|i| self.items.get(i)) {
                    let code = airport.code;
                    self.close();
                    return Some(code);
                }
            }
            Key::Escape => self.close(),
            _ => {}
        }
        None
    }
}
