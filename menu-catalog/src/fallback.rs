use crate::{BaseLiquor, Drink, DrinkDraft, DrinkId};

const BUILTIN: &[(&str, &str, f64, BaseLiquor)] = &[
    ("1", "Margarita", 13.0, BaseLiquor::Tequila),
    ("2", "Negroni", 24.0, BaseLiquor::Gin),
    ("3", "Mojito", 12.0, BaseLiquor::Rum),
    ("4", "Old Fashioned", 32.0, BaseLiquor::Whiskey),
    ("5", "Moscow Mule", 10.0, BaseLiquor::Vodka),
    ("6", "Whiskey Sour", 20.0, BaseLiquor::Whiskey),
    ("7", "Daiquiri", 15.0, BaseLiquor::Rum),
    ("8", "Gin & Tonic", 12.0, BaseLiquor::Gin),
];

/// A small static menu shown when the backend cannot be reached.
pub fn builtin_catalog() -> Vec<Drink> {
    BUILTIN
        .iter()
        .filter_map(|(id, name, abv, base)| {
            let id = DrinkId::new(*id)?;
            Some(
                DrinkDraft::new("", *abv, base.clone())
                    .with_name(*name)
                    .into_drink(id),
            )
        })
        .collect()
}
