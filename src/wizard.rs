//! Recipe Wizard State
//!
//! Multi-step assembly of a recipe: basics, ingredient groups, steps,
//! variants, then review. Each step must validate before moving on.

use serde_json::{json, Value};

use crate::models::Recipe;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WizardStep {
    Basics,
    Ingredients,
    Steps,
    Variants,
    Review,
}

impl WizardStep {
    pub const ALL: [WizardStep; 5] = [
        WizardStep::Basics,
        WizardStep::Ingredients,
        WizardStep::Steps,
        WizardStep::Variants,
        WizardStep::Review,
    ];

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|step| *step == self).unwrap_or(0)
    }

    pub fn title(self) -> &'static str {
        match self {
            WizardStep::Basics => "Basics",
            WizardStep::Ingredients => "Ingredients",
            WizardStep::Steps => "Steps",
            WizardStep::Variants => "Variants",
            WizardStep::Review => "Review",
        }
    }

    fn next(self) -> Option<Self> {
        Self::ALL.get(self.index() + 1).copied()
    }

    fn prev(self) -> Option<Self> {
        self.index().checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct LineDraft {
    pub ingredient_id: String,
    pub quantity: String,
    pub unit: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GroupDraft {
    pub title: String,
    pub lines: Vec<LineDraft>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct VariantDraft {
    pub name: String,
    pub rate: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RecipeDraft {
    /// Set when editing an existing recipe
    pub id: Option<String>,
    pub name: String,
    pub description: String,
    pub category_id: String,
    pub portions: String,
    pub groups: Vec<GroupDraft>,
    pub steps: Vec<String>,
    pub ustensile_ids: Vec<String>,
    /// New variants, created once the recipe exists
    pub variants: Vec<VariantDraft>,
}

impl Default for RecipeDraft {
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            description: String::new(),
            category_id: String::new(),
            portions: "1".to_string(),
            groups: vec![GroupDraft {
                title: "Main".to_string(),
                lines: vec![LineDraft::default()],
            }],
            steps: vec![String::new()],
            ustensile_ids: Vec::new(),
            variants: Vec::new(),
        }
    }
}

fn number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

impl RecipeDraft {
    pub fn from_recipe(recipe: &Recipe) -> Self {
        let mut steps = recipe.steps.clone();
        steps.sort_by_key(|step| step.order);
        Self {
            id: Some(recipe.id.clone()),
            name: recipe.name.clone(),
            description: recipe.description.clone().unwrap_or_default(),
            category_id: recipe.category.as_ref().map(|c| c.id().to_string()).unwrap_or_default(),
            portions: recipe.portions.value().max(1.0).to_string(),
            groups: recipe
                .ingredient_groups
                .iter()
                .map(|group| GroupDraft {
                    title: group.title.clone(),
                    lines: group
                        .items
                        .iter()
                        .map(|line| LineDraft {
                            ingredient_id: line.ingredient.id().to_string(),
                            quantity: line.quantity.value().to_string(),
                            unit: line.unit.clone().unwrap_or_default(),
                        })
                        .collect(),
                })
                .collect(),
            steps: steps.into_iter().map(|step| step.description).collect(),
            ustensile_ids: recipe.ustensiles.iter().map(|u| u.id().to_string()).collect(),
            variants: Vec::new(),
        }
    }

    pub fn validate_step(&self, step: WizardStep) -> Vec<String> {
        let mut errors = Vec::new();
        match step {
            WizardStep::Basics => {
                if self.name.trim().is_empty() {
                    errors.push("Recipe name is required".to_string());
                }
                if !number(&self.portions).is_some_and(|n| n >= 1.0) {
                    errors.push("Portions must be at least 1".to_string());
                }
            }
            WizardStep::Ingredients => {
                if self.groups.is_empty() {
                    errors.push("Add at least one ingredient group".to_string());
                }
                for (g, group) in self.groups.iter().enumerate() {
                    let name = if group.title.trim().is_empty() {
                        errors.push(format!("Group {} needs a title", g + 1));
                        format!("Group {}", g + 1)
                    } else {
                        group.title.trim().to_string()
                    };
                    if group.lines.is_empty() {
                        errors.push(format!("{} has no ingredients", name));
                    }
                    for (l, line) in group.lines.iter().enumerate() {
                        if line.ingredient_id.is_empty() {
                            errors.push(format!("{}, line {}: pick an ingredient", name, l + 1));
                        }
                        if !number(&line.quantity).is_some_and(|n| n > 0.0) {
                            errors.push(format!(
                                "{}, line {}: quantity must be positive",
                                name,
                                l + 1
                            ));
                        }
                    }
                }
            }
            WizardStep::Steps => {
                if self.steps.is_empty() {
                    errors.push("Add at least one step".to_string());
                }
                for (i, step) in self.steps.iter().enumerate() {
                    if step.trim().is_empty() {
                        errors.push(format!("Step {} is empty", i + 1));
                    }
                }
            }
            WizardStep::Variants => {
                for (i, variant) in self.variants.iter().enumerate() {
                    if variant.name.trim().is_empty() {
                        errors.push(format!("Variant {} needs a name", i + 1));
                    }
                    if !number(&variant.rate).is_some_and(|n| n >= 0.0) {
                        errors.push(format!(
                            "Variant {}: rate must be a non-negative number",
                            i + 1
                        ));
                    }
                }
            }
            WizardStep::Review => {
                for step in &WizardStep::ALL[..WizardStep::ALL.len() - 1] {
                    errors.extend(self.validate_step(*step));
                }
            }
        }
        errors
    }

    pub fn add_group(&mut self) {
        self.groups.push(GroupDraft {
            title: String::new(),
            lines: vec![LineDraft::default()],
        });
    }

    pub fn remove_group(&mut self, index: usize) {
        if index < self.groups.len() {
            self.groups.remove(index);
        }
    }

    pub fn add_line(&mut self, group: usize) {
        if let Some(group) = self.groups.get_mut(group) {
            group.lines.push(LineDraft::default());
        }
    }

    pub fn line(&self, group: usize, line: usize) -> Option<&LineDraft> {
        self.groups.get(group).and_then(|g| g.lines.get(line))
    }

    pub fn line_mut(&mut self, group: usize, line: usize) -> Option<&mut LineDraft> {
        self.groups.get_mut(group).and_then(|g| g.lines.get_mut(line))
    }

    pub fn remove_line(&mut self, group: usize, line: usize) {
        if let Some(group) = self.groups.get_mut(group) {
            if line < group.lines.len() {
                group.lines.remove(line);
            }
        }
    }

    pub fn add_step(&mut self) {
        self.steps.push(String::new());
    }

    pub fn remove_step(&mut self, index: usize) {
        if index < self.steps.len() {
            self.steps.remove(index);
        }
    }

    /// Swap a step with its neighbour; out-of-range moves are ignored
    pub fn move_step(&mut self, index: usize, up: bool) {
        let target = if up { index.checked_sub(1) } else { Some(index + 1) };
        if let Some(target) = target.filter(|t| *t < self.steps.len() && index < self.steps.len()) {
            self.steps.swap(index, target);
        }
    }

    pub fn add_variant(&mut self) {
        self.variants.push(VariantDraft {
            name: String::new(),
            rate: "0".to_string(),
        });
    }

    pub fn remove_variant(&mut self, index: usize) {
        if index < self.variants.len() {
            self.variants.remove(index);
        }
    }

    pub fn to_payload(&self) -> Value {
        let category = match self.category_id.trim() {
            "" => Value::Null,
            id => Value::String(id.to_string()),
        };
        let groups: Vec<Value> = self
            .groups
            .iter()
            .map(|group| {
                let items: Vec<Value> = group
                    .lines
                    .iter()
                    .map(|line| {
                        json!({
                            "ingredient": line.ingredient_id,
                            "quantity": number(&line.quantity).unwrap_or(0.0),
                            "unit": line.unit.trim(),
                        })
                    })
                    .collect();
                json!({ "title": group.title.trim(), "items": items })
            })
            .collect();
        let steps: Vec<Value> = self
            .steps
            .iter()
            .enumerate()
            .map(|(i, text)| json!({ "order": i + 1, "description": text.trim() }))
            .collect();

        json!({
            "name": self.name.trim(),
            "description": self.description.trim(),
            "category": category,
            "portions": number(&self.portions).unwrap_or(1.0),
            "ingredientGroups": groups,
            "steps": steps,
            "ustensiles": self.ustensile_ids,
        })
    }

    /// Payloads for the variant resource, bound to the saved recipe
    pub fn variant_payloads(&self, recipe_id: &str) -> Vec<Value> {
        self.variants
            .iter()
            .map(|variant| {
                json!({
                    "name": variant.name.trim(),
                    "rate": number(&variant.rate).unwrap_or(0.0),
                    "recipe": recipe_id,
                })
            })
            .collect()
    }
}

/// Step cursor plus the errors that blocked the last move
#[derive(Clone, Debug, PartialEq)]
pub struct RecipeWizard {
    pub step: WizardStep,
    pub draft: RecipeDraft,
    pub errors: Vec<String>,
}

impl RecipeWizard {
    pub fn new(draft: RecipeDraft) -> Self {
        Self {
            step: WizardStep::Basics,
            draft,
            errors: Vec::new(),
        }
    }

    /// Advance if the current step validates
    pub fn next(&mut self) -> bool {
        self.errors = self.draft.validate_step(self.step);
        if !self.errors.is_empty() {
            return false;
        }
        match self.step.next() {
            Some(step) => {
                self.step = step;
                true
            }
            None => false,
        }
    }

    pub fn back(&mut self) -> bool {
        self.errors.clear();
        match self.step.prev() {
            Some(step) => {
                self.step = step;
                true
            }
            None => false,
        }
    }

    pub fn is_review(&self) -> bool {
        self.step == WizardStep::Review
    }

    pub fn is_edit(&self) -> bool {
        self.draft.id.is_some()
    }
}

/// Final notice after a wizard save. Any failed variant turns the
/// whole save into an error notice.
pub fn variant_summary(updated: bool, variant_errors: &[String]) -> Result<String, String> {
    let noun = if updated { "updated" } else { "created" };
    match variant_errors {
        [] => Ok(format!("Recipe {noun}")),
        [only] => Err(format!("Recipe {noun}, but a variant failed: {only}")),
        all => Err(format!("Recipe {noun}, but {} variants failed: {}", all.len(), all.join("; "))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> RecipeDraft {
        RecipeDraft {
            name: "Crêpes".to_string(),
            portions: "4".to_string(),
            groups: vec![GroupDraft {
                title: "Batter".to_string(),
                lines: vec![LineDraft {
                    ingredient_id: "i1".to_string(),
                    quantity: "250".to_string(),
                    unit: "g".to_string(),
                }],
            }],
            steps: vec!["Whisk".to_string(), "Rest".to_string()],
            ..RecipeDraft::default()
        }
    }

    #[test]
    fn test_next_is_gated_by_validation() {
        let mut wizard = RecipeWizard::new(RecipeDraft::default());
        assert!(!wizard.next());
        assert_eq!(wizard.step, WizardStep::Basics);
        assert_eq!(wizard.errors, vec!["Recipe name is required"]);

        wizard.draft.name = "Soup".to_string();
        assert!(wizard.next());
        assert_eq!(wizard.step, WizardStep::Ingredients);
        assert!(wizard.errors.is_empty());

        assert!(!wizard.next());
        assert_eq!(
            wizard.errors,
            vec!["Main, line 1: pick an ingredient", "Main, line 1: quantity must be positive"]
        );
    }

    #[test]
    fn test_walk_to_review_and_back() {
        let mut wizard = RecipeWizard::new(filled());
        while wizard.next() {}
        assert!(wizard.is_review());
        assert!(wizard.errors.is_empty());
        assert!(!wizard.next());

        assert!(wizard.back());
        assert_eq!(wizard.step, WizardStep::Variants);
        wizard.step = WizardStep::Basics;
        assert!(!wizard.back());
    }

    #[test]
    fn test_review_collects_every_step() {
        let mut draft = filled();
        draft.steps = vec![" ".to_string()];
        draft.add_variant();
        let errors = draft.validate_step(WizardStep::Review);
        assert_eq!(errors, vec!["Step 1 is empty", "Variant 1 needs a name"]);
    }

    #[test]
    fn test_step_editing() {
        let mut draft = filled();
        draft.add_step();
        draft.steps[2] = "Cook".to_string();
        draft.move_step(2, true);
        assert_eq!(draft.steps, vec!["Whisk", "Cook", "Rest"]);
        draft.move_step(0, true);
        draft.move_step(2, false);
        assert_eq!(draft.steps, vec!["Whisk", "Cook", "Rest"]);
        draft.remove_step(0);
        assert_eq!(draft.steps, vec!["Cook", "Rest"]);
    }

    #[test]
    fn test_payload_shape() {
        let mut draft = filled();
        draft.category_id = "c1".to_string();
        draft.ustensile_ids = vec!["u1".to_string()];
        let payload = draft.to_payload();

        assert_eq!(payload["name"], "Crêpes");
        assert_eq!(payload["portions"], 4.0);
        assert_eq!(payload["category"], "c1");
        assert_eq!(payload["ingredientGroups"][0]["items"][0]["ingredient"], "i1");
        assert_eq!(payload["ingredientGroups"][0]["items"][0]["quantity"], 250.0);
        assert_eq!(payload["steps"][1]["order"], 2);
        assert_eq!(payload["ustensiles"][0], "u1");
    }

    #[test]
    fn test_draft_from_existing_recipe() {
        let recipe: Recipe = serde_json::from_value(json!({
            "_id": "r1",
            "name": "Soup",
            "category": "c9",
            "portions": "2",
            "ingredientGroups": [{
                "title": "Base",
                "items": [{"ingredient": "i3", "quantity": 1.5, "unit": "l"}]
            }],
            "steps": [{"order": 2, "description": "Simmer"}, {"order": 1, "description": "Chop"}],
            "ustensiles": [{"_id": "u4", "name": "Pot"}]
        }))
        .unwrap();
        let draft = RecipeDraft::from_recipe(&recipe);

        assert_eq!(draft.id.as_deref(), Some("r1"));
        assert_eq!(draft.category_id, "c9");
        assert_eq!(draft.portions, "2");
        assert_eq!(draft.groups[0].lines[0].quantity, "1.5");
        assert_eq!(draft.steps, vec!["Chop", "Simmer"]);
        assert_eq!(draft.ustensile_ids, vec!["u4"]);
        assert!(draft.validate_step(WizardStep::Review).is_empty());

        let variants = RecipeDraft {
            variants: vec![VariantDraft { name: "Large".into(), rate: "1.5".into() }],
            ..draft
        }
        .variant_payloads("r1");
        assert_eq!(variants[0]["recipe"], "r1");
        assert_eq!(variants[0]["rate"], 1.5);
    }

    #[test]
    fn test_editing_keeps_small_quantities_exact() {
        let recipe: Recipe = serde_json::from_value(json!({
            "_id": "r2",
            "name": "Pizza",
            "portions": 1,
            "ingredientGroups": [{"title": "Dough", "items": [
                {"ingredient": "i1", "quantity": 0.125, "unit": "kg"},
                {"ingredient": "i2", "quantity": "0.004", "unit": "kg"}
            ]}],
            "steps": [{"order": 1, "description": "Knead"}]
        }))
        .unwrap();
        let draft = RecipeDraft::from_recipe(&recipe);

        let quantities: Vec<&str> =
            draft.groups[0].lines.iter().map(|l| l.quantity.as_str()).collect();
        assert_eq!(quantities, vec!["0.125", "0.004"]);
        assert!(draft.validate_step(WizardStep::Review).is_empty());

        let payload = draft.to_payload();
        assert_eq!(payload["ingredientGroups"][0]["items"][0]["quantity"], 0.125);
        assert_eq!(payload["ingredientGroups"][0]["items"][1]["quantity"], 0.004);
    }

    #[test]
    fn test_variant_failures_replace_success_notice() {
        assert_eq!(variant_summary(false, &[]), Ok("Recipe created".to_string()));
        assert_eq!(variant_summary(true, &[]), Ok("Recipe updated".to_string()));
        assert_eq!(
            variant_summary(false, &["HTTP 500".to_string()]),
            Err("Recipe created, but a variant failed: HTTP 500".to_string())
        );
        let errors = vec!["HTTP 400".to_string(), "HTTP 500".to_string()];
        assert_eq!(
            variant_summary(true, &errors),
            Err("Recipe updated, but 2 variants failed: HTTP 400; HTTP 500".to_string())
        );
    }
}
