use crate::{BaseLiquor, Drink};

/// How a drink's base is labelled in listings.
///
/// This only changes presentation; grouping always uses [`Drink::category`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DisplayPolicy {
    /// Always show the base label as stored.
    #[default]
    Literal,
    /// Drinks based on the generic `Liquor` bucket show their first ingredient instead.
    FirstIngredientForLiquor,
}

impl DisplayPolicy {
    pub fn base_label<'a>(self, drink: &'a Drink) -> &'a str {
        match self {
            Self::Literal => drink.category(),
            Self::FirstIngredientForLiquor => match (&drink.base_liquor, drink.ingredients.first())
            {
                (BaseLiquor::Liquor, Some(first)) if !first.item.trim().is_empty() => &first.item,
                _ => drink.category(),
            },
        }
    }
}

/// Renders an ABV without a trailing `.0` for whole percentages: `13%`, `12.5%`.
pub fn format_abv(abv: f64) -> String {
    if abv.fract() == 0.0 {
        format!("{}%", abv as i64)
    } else {
        format!("{abv}%")
    }
}
