//! Static product catalog and business location

/// A product shown in the catalog dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Product {
    pub key: &'static str,
    pub title: &'static str,
    pub specifications: &'static [&'static str],
    pub applications: &'static str,
    pub benefits: &'static [&'static str],
}

pub static PRODUCTS: [Product; 3] = [
    Product {
        key: "cement",
        title: "Cement Interlocking Bricks",
        specifications: &[
            "Compressive Strength: 35-40 N/mm²",
            "Size: Available in multiple dimensions",
            "Water Absorption: Less than 10%",
            "Available in Double and Triple lock variants",
        ],
        applications: "Perfect for residential buildings, commercial complexes, boundary walls, \
                       and industrial structures requiring superior strength and precision.",
        benefits: &[
            "Faster construction with precise interlocking",
            "Reduced mortar consumption",
            "Excellent load-bearing capacity",
            "Cost-effective solution",
        ],
    },
    Product {
        key: "soil",
        title: "Classic Cement Bricks",
        specifications: &[
            "Compressive Strength: 30-35 N/mm²",
            "Made from premium cement, sand, and aggregates",
            "Low water absorption rate",
            "Standard brick dimensions",
        ],
        applications: "Ideal for traditional construction methods, load-bearing walls, and \
                       projects requiring proven reliability at an economical price point.",
        benefits: &[
            "Budget-friendly without compromising quality",
            "Natural thermal insulation properties",
            "Time-tested durability",
            "Easy availability and handling",
        ],
    },
    Product {
        key: "custom",
        title: "Light Weight Bricks",
        specifications: &[
            "Weight: 40-50% lighter than conventional bricks",
            "High load-bearing capacity despite low weight",
            "Superior thermal insulation",
            "Made with imported lightweight aggregates",
        ],
        applications: "Perfect for high-rise buildings, partition walls, and projects where \
                       reduced structural load and improved insulation are priorities.",
        benefits: &[
            "Reduced transportation and handling costs",
            "Lower structural load on foundation",
            "Excellent thermal and acoustic insulation",
            "Faster construction due to easy handling",
        ],
    },
];

/// Position of a product by key, falling back to the first product
pub fn product_index(key: &str) -> usize {
    PRODUCTS.iter().position(|p| p.key == key).unwrap_or(0)
}

/// Business location shown in the location panel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    pub name: &'static str,
    pub address: &'static str,
    pub lat: f64,
    pub lng: f64,
    pub phone: &'static str,
    pub email: &'static str,
}

pub const LOCATION: Location = Location {
    name: "JRB Industries",
    address: "Chalakudy, Kerala",
    lat: 10.3102,
    lng: 76.3267,
    phone: "+91 98765 43210",
    email: "contact@jrbindustries.com",
};

impl Location {
    /// Google Maps link for turn-by-turn directions
    pub fn directions_url(&self) -> String {
        format!("https://maps.google.com/?q={},{}", self.lat, self.lng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::INQUIRY_TYPES;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_product_lookup() {
        assert_eq!(PRODUCTS[product_index("soil")].title, "Classic Cement Bricks");
        assert_eq!(PRODUCTS[product_index("custom")].title, "Light Weight Bricks");
    }

    #[test]
    fn test_unknown_product_falls_back_to_cement() {
        assert_eq!(PRODUCTS[product_index("granite")].key, "cement");
        assert_eq!(PRODUCTS[product_index("")].key, "cement");
    }

    #[test]
    fn test_every_product_is_an_inquiry_type() {
        for p in &PRODUCTS {
            assert!(INQUIRY_TYPES.contains(&p.title), "{} missing", p.title);
        }
    }

    #[test]
    fn test_directions_url() {
        assert_eq!(
            LOCATION.directions_url(),
            "https://maps.google.com/?q=10.3102,76.3267"
        );
    }
}
