use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

id_newtype!(DishId);

/// Role flag value that unlocks menu editing.
pub const CHEF_ROLE_FLAG: &str = "christoffel";
/// Role flag value used whenever no chef flag was supplied.
pub const VIEWER_ROLE_FLAG: &str = "user";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Role {
    Chef,
    #[default]
    Viewer,
}

impl Role {
    /// Any flag other than the chef flag, including an absent one, is a viewer.
    pub fn from_flag(flag: Option<&str>) -> Self {
        match flag {
            Some(CHEF_ROLE_FLAG) => Self::Chef,
            _ => Self::Viewer,
        }
    }

    pub fn as_flag(self) -> &'static str {
        match self {
            Self::Chef => CHEF_ROLE_FLAG,
            Self::Viewer => VIEWER_ROLE_FLAG,
        }
    }

    pub fn can_edit(self) -> bool {
        self == Self::Chef
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Chef => "Christoffel (Chef)",
            Self::Viewer => "User",
        }
    }
}

/// Course category of a dish.
///
/// The label is kept exactly as it was received so that a decoded record
/// re-encodes to the same text. Only the three canonical spellings map onto
/// the well-known variants; everything else, including `"starter"`, is held
/// as [`Course::Other`] until [`Course::normalized`] folds it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Course {
    Starter,
    Main,
    Dessert,
    Other(String),
}

impl Course {
    pub fn well_known() -> [Course; 3] {
        [Course::Starter, Course::Main, Course::Dessert]
    }

    pub fn from_label(label: &str) -> Self {
        match label {
            "Starter" => Self::Starter,
            "Main" => Self::Main,
            "Dessert" => Self::Dessert,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Starter => "Starter",
            Self::Main => "Main",
            Self::Dessert => "Dessert",
            Self::Other(label) => label,
        }
    }

    /// Grouping key: trimmed, first letter upper-cased, the rest lower-cased.
    pub fn normalized(&self) -> Course {
        match self {
            Self::Other(label) => Self::from_label(&canonical_capitalization(label.trim())),
            known => known.clone(),
        }
    }
}

fn canonical_capitalization(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Course {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Course {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(Self::from_label(&label))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DishRecord {
    pub id: DishId,
    pub name: String,
    pub description: String,
    pub course: Course,
    pub price: f64,
}

/// Raw form input for a new dish, exactly as typed. Blank fields count as missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DishInput {
    pub name: String,
    pub description: String,
    pub course: String,
    pub price: String,
}

impl DishInput {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        course: impl Into<String>,
        price: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            course: course.into(),
            price: price.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_role_flags_default_to_viewer() {
        assert_eq!(Role::from_flag(Some("christoffel")), Role::Chef);
        assert_eq!(Role::from_flag(Some("Christoffel")), Role::Viewer);
        assert_eq!(Role::from_flag(Some("admin")), Role::Viewer);
        assert_eq!(Role::from_flag(None), Role::Viewer);
    }

    #[test]
    fn course_labels_survive_serde_verbatim() {
        let course: Course = serde_json::from_str("\"starter \"").expect("course");
        assert_eq!(course, Course::Other("starter ".to_string()));
        assert_eq!(
            serde_json::to_string(&course).expect("encode"),
            "\"starter \""
        );
    }

    #[test]
    fn normalization_folds_case_onto_well_known_courses() {
        assert_eq!(Course::from_label("  dESSERT").normalized(), Course::Dessert);
        assert_eq!(Course::from_label("MAIN").normalized(), Course::Main);
        assert_eq!(
            Course::from_label("side DISH").normalized(),
            Course::Other("Side dish".to_string())
        );
    }
}
