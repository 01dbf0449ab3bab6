use serde::Serialize;

/// An entry of the compiled-in airport directory.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Airport {
    pub code: &'static str,
    pub city: &'static str,
    pub country: &'static str,
    pub name: &'static str,
}

const DIRECTORY: [Airport; 8] = [
    Airport { code: "TUN", city: "Tunis", country: "Tunisia", name: "Tunis Carthage Airport" },
    Airport { code: "CDG", city: "Paris", country: "France", name: "Charles de Gaulle Airport" },
    Airport { code: "JFK", city: "New York", country: "USA", name: "John F Kennedy International Airport" },
    Airport { code: "LHR", city: "London", country: "UK", name: "Heathrow Airport" },
    Airport { code: "DXB", city: "Dubai", country: "UAE", name: "Dubai International Airport" },
    Airport { code: "FRA", city: "Frankfurt", country: "Germany", name: "Frankfurt am Main Airport" },
    Airport { code: "AMS", city: "Amsterdam", country: "Netherlands", name: "Amsterdam Airport Schiphol" },
    Airport { code: "IST", city: "Istanbul", country: "Turkey", name: "Istanbul Airport" },
];

/// The full directory, in table order.
pub fn airports() -> &'static [Airport] {
    &DIRECTORY
}

/// Resolve a 3-letter code, ignoring case and surrounding whitespace.
pub fn find(code: &str) -> Option<&'static Airport> {
    let code = code.trim();
    DIRECTORY.iter().find(|a| a.code.eq_ignore_ascii_case(code))
}

pub fn is_known(code: &str) -> bool {
    find(code).is_some()
}
