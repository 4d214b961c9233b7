//! Translation between backend records and the canonical [`Drink`].
//!
//! This is the only place that knows the backend's field names:
//!
//! | backend          | canonical        |
//! |------------------|------------------|
//! | `id` / `_id`     | `id`             |
//! | `korean_name`    | `localized_name` |
//! | `base`           | `base_liquor`    |
//! | `shake_or_stir`  | `mixing_method`  |
//! | `image_url`      | `image_url`      |

use std::collections::HashSet;

use serde::Deserialize;
use serde_json::{Value, json};

use crate::{
    BaseLiquor, Drink, DrinkDraft, DrinkId, Glass, Ice, Ingredient, MappingError, MixingMethod,
};

#[derive(Deserialize)]
struct RawDrink {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default, rename = "_id")]
    storage_id: Option<Value>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    korean_name: Option<String>,
    #[serde(default)]
    abv: Option<Value>,
    #[serde(default)]
    base: Option<Value>,
    #[serde(default)]
    glass: Option<String>,
    #[serde(default)]
    ice: Option<String>,
    #[serde(default)]
    shake_or_stir: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    ingredients: Option<Vec<RawIngredient>>,
    #[serde(default)]
    instructions: Option<Vec<String>>,
    #[serde(default)]
    tags: Option<Vec<String>>,
    #[serde(default)]
    image_url: Option<String>,
    #[serde(default)]
    available: Option<bool>,
}

// Seed data stores ingredients as bare names.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawIngredient {
    Full {
        item: String,
        #[serde(default)]
        amount: Option<String>,
    },
    Bare(String),
}

impl From<RawIngredient> for Ingredient {
    fn from(raw: RawIngredient) -> Self {
        match raw {
            RawIngredient::Full { item, amount } => Ingredient {
                item,
                amount: amount.unwrap_or_default(),
            },
            RawIngredient::Bare(item) => Ingredient {
                item,
                amount: String::new(),
            },
        }
    }
}

/// Maps one backend record to a [`Drink`].
///
/// Fails when `id`, `abv` or `base` is absent, `null`, or unusable. No partially filled drink
/// is ever returned.
pub fn map_record(record: &Value) -> Result<Drink, MappingError> {
    if !record.is_object() {
        return Err(MappingError::NotAnObject);
    }
    let raw = RawDrink::deserialize(record).map_err(|e| MappingError::Malformed(e.to_string()))?;

    let id = parse_id(raw.id.as_ref().or(raw.storage_id.as_ref()))?;
    let abv = parse_abv(raw.abv.as_ref())?;
    let base_liquor = parse_base(raw.base.as_ref())?;

    let drink = Drink {
        id,
        name: raw.name.unwrap_or_default(),
        localized_name: raw.korean_name.unwrap_or_default(),
        abv,
        base_liquor,
        glass: raw.glass.as_deref().map(Glass::parse).unwrap_or_default(),
        ice: raw.ice.as_deref().map(Ice::parse).unwrap_or_default(),
        mixing_method: raw
            .shake_or_stir
            .as_deref()
            .map(MixingMethod::parse)
            .unwrap_or_default(),
        description: raw.description.unwrap_or_default(),
        ingredients: raw
            .ingredients
            .unwrap_or_default()
            .into_iter()
            .map(Ingredient::from)
            .collect(),
        instructions: raw.instructions.unwrap_or_default(),
        tags: dedup_tags(raw.tags.unwrap_or_default()),
        image_url: raw.image_url.unwrap_or_default(),
        available: raw.available.unwrap_or(true),
    };

    if drink.name.trim().is_empty() && drink.localized_name.trim().is_empty() {
        cwarn!(id = %drink.id, "drink has neither a name nor a localized name");
    }
    ctrace!(id = %drink.id, base = %drink.base_liquor, "mapped record");
    Ok(drink)
}

/// Maps a backend list response.
///
/// The first bad record fails the whole batch, tagged with its position.
pub fn map_records(records: &Value) -> Result<Vec<Drink>, MappingError> {
    let Some(items) = records.as_array() else {
        return Err(MappingError::NotAnArray);
    };
    let drinks = items
        .iter()
        .enumerate()
        .map(|(index, record)| {
            map_record(record).map_err(|source| MappingError::Record {
                index,
                source: Box::new(source),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    cdebug!(count = drinks.len(), "mapped record list");
    Ok(drinks)
}

/// Builds the backend request body for a create/update call.
pub fn to_raw(draft: &DrinkDraft) -> Value {
    let name = if draft.name.trim().is_empty() {
        Value::Null
    } else {
        Value::String(draft.name.clone())
    };
    json!({
        "name": name,
        "korean_name": draft.localized_name,
        "abv": abv_to_json(draft.abv),
        "description": draft.description,
        "base": draft.base_liquor.as_str(),
        "glass": draft.glass.as_str(),
        "ingredients": draft.ingredients,
        "ice": draft.ice.as_str(),
        "shake_or_stir": draft.mixing_method.as_str(),
        "instructions": draft.instructions,
        "tags": draft.tags,
        "image_url": draft.image_url,
        "available": draft.available,
    })
}

/// Checks a draft against the same rules [`map_record`] applies to what the backend sends back.
pub fn validate_draft(draft: &DrinkDraft) -> Result<(), MappingError> {
    check_abv(draft.abv)?;
    Ok(())
}

/// Reads a bare id out of an acknowledgement body such as `{"message": "Created", "id": "..."}`.
pub fn ack_id(body: &Value) -> Option<DrinkId> {
    let obj = body.as_object()?;
    parse_id(obj.get("id").or_else(|| obj.get("_id"))).ok()
}

fn parse_id(value: Option<&Value>) -> Result<DrinkId, MappingError> {
    let raw = match value {
        None => return Err(MappingError::MissingField { field: "id" }),
        Some(Value::String(s)) => s.as_str(),
        // Extended JSON, e.g. `{"$oid": "..."}`.
        Some(Value::Object(obj)) => match obj.get("$oid") {
            Some(Value::String(s)) => s.as_str(),
            _ => return Err(MappingError::invalid("id", "expected a string")),
        },
        Some(other) => {
            return Err(MappingError::invalid(
                "id",
                format!("expected a string, found {}", kind(other)),
            ));
        }
    };
    DrinkId::new(raw).ok_or_else(|| MappingError::invalid("id", "must not be empty"))
}

fn parse_abv(value: Option<&Value>) -> Result<f64, MappingError> {
    let abv = match value {
        None => return Err(MappingError::MissingField { field: "abv" }),
        Some(Value::Number(n)) => n
            .as_f64()
            .ok_or_else(|| MappingError::invalid("abv", "not representable as a number"))?,
        Some(Value::String(s)) => {
            let digits = s.trim().trim_end_matches('%').trim();
            digits
                .parse::<f64>()
                .map_err(|_| MappingError::invalid("abv", format!("`{s}` is not a percentage")))?
        }
        Some(other) => {
            return Err(MappingError::invalid(
                "abv",
                format!("expected a number, found {}", kind(other)),
            ));
        }
    };
    check_abv(abv)
}

fn check_abv(abv: f64) -> Result<f64, MappingError> {
    if !abv.is_finite() || !(0.0..=100.0).contains(&abv) {
        return Err(MappingError::invalid(
            "abv",
            format!("{abv} is outside 0..=100"),
        ));
    }
    Ok(abv)
}

fn parse_base(value: Option<&Value>) -> Result<BaseLiquor, MappingError> {
    match value {
        None => Err(MappingError::MissingField { field: "base" }),
        Some(Value::String(s)) if s.trim().is_empty() => {
            Err(MappingError::invalid("base", "must not be empty"))
        }
        Some(Value::String(s)) => Ok(BaseLiquor::parse(s)),
        Some(other) => Err(MappingError::invalid(
            "base",
            format!("expected a string, found {}", kind(other)),
        )),
    }
}

fn abv_to_json(abv: f64) -> Value {
    if abv.fract() == 0.0 {
        json!(abv as i64)
    } else {
        json!(abv)
    }
}

fn dedup_tags(tags: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::with_capacity(tags.len());
    tags.into_iter()
        .filter(|tag| seen.insert(tag.clone()))
        .collect()
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
