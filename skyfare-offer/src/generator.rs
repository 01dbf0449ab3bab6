use chrono::{Datelike, Duration, NaiveDate};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::{Deal, FeaturedDeal, Month, Region, TripType};

pub const DEFAULT_BATCH_SIZE: usize = 30;

const HUB: &str = "DJERBA(DJE)";
const DESTINATIONS: [&str; 7] = ["Geneva", "Nice", "Munich", "Lyon", "Marseille", "Paris", "Frankfurt"];

const PRICE_MIN: u32 = 450_000;
const PRICE_MAX: u32 = 750_000;
/// Roughly 0.3 years
const MAX_EXPIRY_DAYS: i64 = 109;

const FEATURED: [(&str, &str); 4] = [
    ("France", "https://images.pexels.com/photos/2738173/pexels-photo-2738173.jpeg"),
    ("Italy", "https://images.pexels.com/photos/1796736/pexels-photo-1796736.jpeg"),
    ("Germany", "https://images.pexels.com/photos/23106809/pexels-photo-23106809.jpeg"),
    ("Spain", "https://images.pexels.com/photos/3757144/pexels-photo-3757144.jpeg"),
];

/// Synthesizes promotional deals. Every batch is different.
pub struct DealGenerator {
    batch_size: usize,
}

impl DealGenerator {
    pub fn new(batch_size: usize) -> Self {
        Self { batch_size }
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn generate<R: Rng + ?Sized>(&self, today: NaiveDate, rng: &mut R) -> Vec<Deal> {
        (0..self.batch_size)
            .map(|i| {
                let to = DESTINATIONS.choose(rng).copied().unwrap_or("Paris").to_uppercase();
                let expiry = today + Duration::days(rng.gen_range(1..=MAX_EXPIRY_DAYS));
                Deal {
                    id: format!("deal-{}", i),
                    title: format!("{} → {}", HUB, to),
                    image: format!("https://loremflickr.com/640/480/city?lock={}", rng.gen_range(1..100_000)),
                    price: rng.gen_range(PRICE_MIN..=PRICE_MAX),
                    last_date: expiry.format("%d/%m/%Y").to_string(),
                    trip_type: *TripType::ALL.choose(rng).unwrap_or(&TripType::RoundTrip),
                    month: *Month::ALL.choose(rng).unwrap_or(&Month::August),
                    region: *Region::ALL.choose(rng).unwrap_or(&Region::Europe),
                }
            })
            .collect()
    }

    /// The four landing-page deals out of Tunis, valid until the end of August.
    pub fn generate_featured<R: Rng + ?Sized>(&self, today: NaiveDate, rng: &mut R) -> Vec<FeaturedDeal> {
        FEATURED
            .iter()
            .enumerate()
            .map(|(i, (country, image))| FeaturedDeal {
                id: format!("deal-{}", i),
                title: format!("Tunis → {}", country),
                image: image.to_string(),
                price: 129 + rng.gen_range(0..250),
                last_date: format!("30 August {}", today.year()),
            })
            .collect()
    }
}

impl Default for DealGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_BATCH_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 5, 1).unwrap()
    }

    #[test]
    fn test_batch_shape() {
        let deals = DealGenerator::default().generate(today(), &mut StdRng::seed_from_u64(3));
        assert_eq!(deals.len(), 30);

        for (i, deal) in deals.iter().enumerate() {
            assert_eq!(deal.id, format!("deal-{}", i));
            assert!(deal.title.starts_with("DJERBA(DJE) → "));
            let dest = deal.title.trim_start_matches("DJERBA(DJE) → ");
            assert!(DESTINATIONS.iter().any(|d| d.to_uppercase() == dest), "{}", dest);
            assert!((PRICE_MIN..=PRICE_MAX).contains(&deal.price));

            let expiry = NaiveDate::parse_from_str(&deal.last_date, "%d/%m/%Y").unwrap();
            assert!(expiry > today());
            assert!(expiry <= today() + Duration::days(MAX_EXPIRY_DAYS));
        }
    }

    #[test]
    fn test_batches_differ() {
        let generator = DealGenerator::new(10);
        let a = generator.generate(today(), &mut StdRng::seed_from_u64(1));
        let b = generator.generate(today(), &mut StdRng::seed_from_u64(2));
        assert_ne!(a, b);

        let again = generator.generate(today(), &mut StdRng::seed_from_u64(1));
        assert_eq!(a, again);
    }

    #[test]
    fn test_featured_deals() {
        let featured = DealGenerator::default().generate_featured(today(), &mut StdRng::seed_from_u64(9));
        assert_eq!(featured.len(), 4);
        assert_eq!(featured[1].title, "Tunis → Italy");
        assert!(featured.iter().all(|d| (129..=378).contains(&d.price)));
        assert!(featured.iter().all(|d| d.last_date == "30 August 2026"));
    }
}
