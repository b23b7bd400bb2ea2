//! Point-of-interest categories accepted by the category filter.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CoreError;

macro_rules! categories {
    ($($variant:ident),+ $(,)?) => {
        /// A place category. The canonical token is the variant name.
        #[allow(clippy::upper_case_acronyms)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum Category {
            $($variant),+
        }

        impl Category {
            /// Every category, in declaration order.
            pub const ALL: &'static [Category] = &[$(Category::$variant),+];

            /// The token sent to the places service and stored in the
            /// control's `types` string.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Category::$variant => stringify!($variant)),+
                }
            }
        }
    };
}

categories! {
    AirportTerminal,
    AmusementPark,
    ATM,
    Bank,
    Bar,
    BusStation,
    Cafe,
    Campground,
    CarRental,
    Cinema,
    College,
    ConventionCenter,
    Embassy,
    FerryTerminal,
    FuelStation,
    Hospital,
    Hotel,
    Library,
    Museum,
    Park,
    ParkingGarage,
    Pharmacy,
    PoliceStation,
    PostOffice,
    Restaurant,
    School,
    ShoppingMall,
    SportsCenter,
    Stadium,
    Supermarket,
    TouristAttraction,
    TrainStation,
    University,
    Zoo,
}

impl Category {
    /// Human-readable name: `ShoppingMall` becomes `Shopping Mall`.
    /// `ATM` is left as is.
    #[must_use]
    pub fn display_name(self) -> String {
        let token = self.as_str();
        if self == Category::ATM {
            return token.to_string();
        }
        let mut out = String::with_capacity(token.len() + 4);
        for (i, c) in token.chars().enumerate() {
            if i > 0 && c.is_ascii_uppercase() {
                out.push(' ');
            }
            out.push(c);
        }
        out
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolves free text against the category tokens.
///
/// All whitespace is stripped first, so `"Shopping Mall"` and
/// `" ShoppingMall "` both resolve to [`Category::ShoppingMall`]. Matching
/// ignores ASCII case.
impl FromStr for Category {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(&token))
            .ok_or_else(|| CoreError::UnknownCategory(s.to_string()))
    }
}
