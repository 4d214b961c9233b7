use core::cmp::Ordering;

use crate::{BaseLiquor, Drink, DrinkId};

/// Preferred ordering for well-known category labels.
///
/// Labels in the list sort by position; every unlisted label sorts after all listed ones, and
/// unlisted labels sort lexicographically among themselves.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PriorityList {
    labels: Vec<String>,
}

impl PriorityList {
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
        }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn position(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }

    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        match (self.position(a), self.position(b)) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => a.cmp(b),
        }
    }

    /// Sorts `labels` in place. Already-ordered input is left unchanged.
    pub fn order_labels(&self, labels: &mut [String]) {
        labels.sort_by(|a, b| self.compare(a, b));
    }
}

impl Default for PriorityList {
    /// Gin, Rum, Vodka, Whiskey, Tequila, then the catch-all buckets.
    fn default() -> Self {
        Self::new(BaseLiquor::KNOWN.iter().map(BaseLiquor::as_str))
    }
}

/// A category label and the positions of its drinks in the owning [`Catalog`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Category {
    pub label: String,
    members: Vec<usize>,
}

impl Category {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Drinks plus their category projection.
///
/// The projection is rebuilt on every change to the drink list; categories have no identity of
/// their own.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    drinks: Vec<Drink>,
    categories: Vec<Category>,
    priority: PriorityList,
}

impl Catalog {
    pub fn from_drinks(drinks: Vec<Drink>) -> Self {
        Self::with_priority(drinks, PriorityList::default())
    }

    pub fn with_priority(drinks: Vec<Drink>, priority: PriorityList) -> Self {
        let mut catalog = Self {
            drinks,
            categories: Vec::new(),
            priority,
        };
        catalog.rebuild();
        catalog
    }

    fn rebuild(&mut self) {
        let mut categories: Vec<Category> = Vec::new();
        for (index, drink) in self.drinks.iter().enumerate() {
            let label = drink.category();
            match categories.iter_mut().find(|c| c.label == label) {
                Some(category) => category.members.push(index),
                None => categories.push(Category {
                    label: label.to_string(),
                    members: vec![index],
                }),
            }
        }
        // Stable sort; labels are unique so ties cannot occur anyway.
        categories.sort_by(|a, b| self.priority.compare(&a.label, &b.label));
        cdebug!(
            drinks = self.drinks.len(),
            categories = categories.len(),
            "rebuilt category index"
        );
        self.categories = categories;
    }

    pub fn drinks(&self) -> &[Drink] {
        &self.drinks
    }

    pub fn len(&self) -> usize {
        self.drinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drinks.is_empty()
    }

    pub fn priority(&self) -> &PriorityList {
        &self.priority
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.categories.iter().map(|c| c.label.as_str())
    }

    pub fn category(&self, label: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.label == label)
    }

    /// Drinks of `category` in their original relative order.
    pub fn members<'a>(&'a self, category: &'a Category) -> impl Iterator<Item = &'a Drink> + 'a {
        category.members.iter().filter_map(|&i| self.drinks.get(i))
    }

    /// Drinks labelled `label`; empty when the category does not exist.
    pub fn drinks_in<'a>(&'a self, label: &str) -> impl Iterator<Item = &'a Drink> + use<'a> {
        let members: &[usize] = self
            .category(label)
            .map(|c| c.members.as_slice())
            .unwrap_or(&[]);
        members.iter().filter_map(|&i| self.drinks.get(i))
    }

    pub fn drink(&self, id: &DrinkId) -> Option<&Drink> {
        self.drinks.iter().find(|d| &d.id == id)
    }

    pub fn replace(&mut self, drinks: Vec<Drink>) {
        self.drinks = drinks;
        self.rebuild();
    }

    /// Replaces the drink with the same id in place, or appends it.
    pub fn upsert(&mut self, drink: Drink) {
        match self.drinks.iter_mut().find(|d| d.id == drink.id) {
            Some(slot) => *slot = drink,
            None => self.drinks.push(drink),
        }
        self.rebuild();
    }

    pub fn remove(&mut self, id: &DrinkId) -> Option<Drink> {
        let index = self.drinks.iter().position(|d| &d.id == id)?;
        let removed = self.drinks.remove(index);
        self.rebuild();
        Some(removed)
    }

    pub fn into_drinks(self) -> Vec<Drink> {
        self.drinks
    }
}
