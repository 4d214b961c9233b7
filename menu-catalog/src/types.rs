use core::fmt;

use serde::{Deserialize, Serialize};

use crate::MappingError;

label_enum! {
    /// The base spirit a drink is grouped under.
    ///
    /// Labels outside the known set are preserved in `Other` so that every drink still resolves
    /// to exactly one category.
    pub enum BaseLiquor {
        Gin => "Gin",
        Rum => "Rum",
        Vodka => "Vodka",
        Whiskey => "Whiskey" | "Whisky",
        Tequila => "Tequila",
        Liquor => "Liquor",
        Mixed => "Mixed",
        NonAlcohol => "Non-Alcohol" | "Non Alcohol" | "NonAlcohol",
    }
}

label_enum! {
    pub enum Glass {
        Unspecified => "",
        Coupe => "Coupe",
        Highball => "Highball",
        Martini => "Martini",
        OldFashioned => "Old-Fashioned" | "Old Fashioned" | "Rocks",
        Collins => "Collins",
    }
}

label_enum! {
    pub enum Ice {
        Unspecified => "",
        NoIce => "None",
        Chilled => "Chilled",
        Cubed => "Cubed",
        Crushed => "Crushed",
        LargeCube => "Large Cube",
        LargeSphere => "Large Sphere",
    }
}

label_enum! {
    pub enum MixingMethod {
        Unspecified => "",
        Shake => "Shake" | "Shaken",
        Stir => "Stir" | "Stirred",
        Build => "Build" | "Built",
    }
}

impl Default for Glass {
    fn default() -> Self {
        Self::Unspecified
    }
}

impl Default for Ice {
    fn default() -> Self {
        Self::Unspecified
    }
}

impl Default for MixingMethod {
    fn default() -> Self {
        Self::Unspecified
    }
}

/// Backend-assigned drink identity. Never empty once a [`Drink`] exists.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DrinkId(String);

impl DrinkId {
    /// Returns `None` for empty (or whitespace-only) ids.
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return None;
        }
        Some(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DrinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for DrinkId {
    type Error = MappingError;

    fn try_from(id: String) -> Result<Self, Self::Error> {
        Self::new(id).ok_or_else(|| MappingError::invalid("id", "empty id"))
    }
}

impl From<DrinkId> for String {
    fn from(id: DrinkId) -> Self {
        id.0
    }
}

impl AsRef<str> for DrinkId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ingredient {
    pub item: String,
    pub amount: String,
}

impl Ingredient {
    pub fn new(item: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            item: item.into(),
            amount: amount.into(),
        }
    }
}

/// The canonical client-side drink record.
///
/// Produced by [`crate::map_record`]; optional backend fields are always present here as empty
/// values, so rendering code never has to branch on presence.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Drink {
    pub id: DrinkId,
    pub name: String,
    pub localized_name: String,
    /// Alcohol by volume, percent in `0..=100`.
    pub abv: f64,
    pub base_liquor: BaseLiquor,
    pub glass: Glass,
    pub ice: Ice,
    pub mixing_method: MixingMethod,
    pub description: String,
    pub ingredients: Vec<Ingredient>,
    pub instructions: Vec<String>,
    pub tags: Vec<String>,
    pub image_url: String,
    pub available: bool,
}

impl Drink {
    /// The category label this drink is grouped under.
    pub fn category(&self) -> &str {
        self.base_liquor.as_str()
    }

    /// `name`, or the localized name when no name is set.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.localized_name
        } else {
            &self.name
        }
    }

    /// Strips the identity, e.g. to prefill an edit form.
    pub fn to_draft(&self) -> DrinkDraft {
        DrinkDraft {
            name: self.name.clone(),
            localized_name: self.localized_name.clone(),
            abv: self.abv,
            base_liquor: self.base_liquor.clone(),
            glass: self.glass.clone(),
            ice: self.ice.clone(),
            mixing_method: self.mixing_method.clone(),
            description: self.description.clone(),
            ingredients: self.ingredients.clone(),
            instructions: self.instructions.clone(),
            tags: self.tags.clone(),
            image_url: self.image_url.clone(),
            available: self.available,
        }
    }
}

/// A drink without identity: the payload of create and update calls.
#[derive(Clone, Debug, PartialEq)]
pub struct DrinkDraft {
    pub name: String,
    pub localized_name: String,
    pub abv: f64,
    pub base_liquor: BaseLiquor,
    pub glass: Glass,
    pub ice: Ice,
    pub mixing_method: MixingMethod,
    pub description: String,
    pub ingredients: Vec<Ingredient>,
    pub instructions: Vec<String>,
    pub tags: Vec<String>,
    pub image_url: String,
    pub available: bool,
}

impl DrinkDraft {
    pub fn new(localized_name: impl Into<String>, abv: f64, base_liquor: BaseLiquor) -> Self {
        Self {
            name: String::new(),
            localized_name: localized_name.into(),
            abv,
            base_liquor,
            glass: Glass::Unspecified,
            ice: Ice::Unspecified,
            mixing_method: MixingMethod::Unspecified,
            description: String::new(),
            ingredients: Vec::new(),
            instructions: Vec::new(),
            tags: Vec::new(),
            image_url: String::new(),
            available: true,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_ingredient(mut self, item: impl Into<String>, amount: impl Into<String>) -> Self {
        self.ingredients.push(Ingredient::new(item, amount));
        self
    }

    /// Adds a tag unless it is already present.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        let tag = tag.into();
        if !self.tags.contains(&tag) {
            self.tags.push(tag);
        }
        self
    }

    /// Stamps the draft with a backend-assigned id.
    pub fn into_drink(self, id: DrinkId) -> Drink {
        Drink {
            id,
            name: self.name,
            localized_name: self.localized_name,
            abv: self.abv,
            base_liquor: self.base_liquor,
            glass: self.glass,
            ice: self.ice,
            mixing_method: self.mixing_method,
            description: self.description,
            ingredients: self.ingredients,
            instructions: self.instructions,
            tags: self.tags,
            image_url: self.image_url,
            available: self.available,
        }
    }
}
