//! Location records as they come from the dataset and the closed sets of tags they are filtered by.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use signalmap_types::GeoPoint2d;

use crate::color::Color;
use crate::error::SignalMapError;

/// One traffic light. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationRecord {
    /// Unique display identifier.
    pub code: String,
    /// Free-form description, usually the intersection's street names.
    pub description: String,
    /// Jurisdiction the light belongs to.
    pub category: Category,
    /// Kind of intersection the light controls.
    pub intersection_type: IntersectionType,
    /// Geographic position.
    pub position: GeoPoint2d,
}

impl LocationRecord {
    /// Text shown in the list row of the record and matched by the search box.
    pub fn display_text(&self) -> String {
        format!("{} - {}", self.code, self.description)
    }
}

macro_rules! tag_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($(#[$vmeta:meta])* $variant:ident => $value:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $value)]
                $variant,
            )+
            /// Any value not in the known set.
            #[serde(other)]
            Other,
        }

        impl $name {
            /// All tags in display order, [`Self::Other`] last.
            pub const ALL: &'static [$name] = &[$($name::$variant,)+ $name::Other];

            /// Value used by the filter controls and the dataset for this tag.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $value,)+
                    $name::Other => "Other",
                }
            }
        }

        impl FromStr for $name {
            type Err = SignalMapError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .find(|tag| tag.as_str() == s)
                    .copied()
                    .ok_or_else(|| SignalMapError::UnknownTag(s.to_string()))
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

tag_enum! {
    /// Jurisdiction a traffic light belongs to.
    ///
    /// Dataset values outside the known set deserialize into [`Category::Other`].
    Category {
        /// Lights maintained under the SLIP programme.
        Slip => "SLIP",
        /// Alor Gajah district.
        AlorGajah => "Alor Gajah",
        /// Melaka Tengah district.
        MelakaTengah => "Melaka Tengah",
        /// Jasin district.
        Jasin => "Jasin",
    }
}

tag_enum! {
    /// Layout of the intersection a traffic light controls.
    ///
    /// Dataset values outside the known set deserialize into [`IntersectionType::Other`].
    IntersectionType {
        /// Crossroads with four arms.
        FourWay => "4-Way",
        /// Three-armed junction.
        ThreeWay => "T-Junction",
        /// Mid-block pedestrian crossing.
        Pedestrian => "Pedestrian Crossing",
        /// Signalised roundabout.
        Roundabout => "Roundabout",
    }
}

impl Category {
    /// Fill color of the map pins for the lights of this category.
    pub fn pin_color(&self) -> Color {
        match self {
            Category::Slip => Color::from_hex("#125092"),
            Category::AlorGajah => Color::PURPLE,
            Category::MelakaTengah => Color::from_hex("#FFCB10"),
            Category::Jasin => Color::from_hex("#659F14"),
            Category::Other => Color::from_hex("#6C757D"),
        }
    }
}
