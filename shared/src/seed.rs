//! Bundled default data, used when the store holds nothing yet

use rust_decimal::Decimal;

use crate::models::{Category, FinalBuild, FinalBuildElement, Ingredient, Recipe, RecipeYield, SubRecipe};

fn d(mantissa: i64, scale: u32) -> Decimal {
    Decimal::new(mantissa, scale)
}

fn grams(name: &str, amount: i64) -> Ingredient {
    Ingredient::new(name, Decimal::from(amount), "g")
}

fn element(name: &str, weight: Decimal, is_sub_recipe: bool) -> FinalBuildElement {
    FinalBuildElement {
        name: name.to_string(),
        weight,
        unit: "g".to_string(),
        is_sub_recipe,
    }
}

fn category(id: &str, name: &str, description: &str) -> Category {
    Category {
        id: id.to_string(),
        name: name.to_string(),
        description: Some(description.to_string()),
    }
}

pub fn default_categories() -> Vec<Category> {
    vec![
        category("cookies", "Cookies", "Artisan cookie recipes"),
        category("large-cheesecakes", "Large Cheesecakes", "Full-size cheesecake recipes"),
        category("mini-cheesecakes", "Mini Cheesecakes", "Individual portion cheesecakes"),
        category("caramels", "Caramels", "Caramel and toffee products"),
    ]
}

/// The shared cookie dough base used by most cookie recipes
fn cookie_base(sugar: &str) -> Vec<Ingredient> {
    vec![
        grams("Butter unsalted", 125),
        grams("Plain flour", 300),
        grams(sugar, 100),
        grams("Caster sugar", 75),
        Ingredient::new("Egg", Decimal::ONE, "piece"),
        grams("Baking powder", 9),
        grams("Bicarbonate soda", 4),
        grams("Salt", 3),
    ]
}

fn steps(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|line| line.to_string()).collect()
}

pub fn default_recipes() -> Vec<Recipe> {
    let mut raspberry_ingredients = cookie_base("Light brown sugar");
    raspberry_ingredients.extend([
        grams("White chocolate chips", 100),
        grams("Beetroot powder", 9),
        grams("Freeze dried raspberry whole pieces", 12),
    ]);

    let mut lemon_ingredients = cookie_base("Light brown sugar");
    lemon_ingredients.extend([
        grams("Medium lemon zest", 18),
        grams("Mixed peel", 100),
        grams("Mini marshmallow", 50),
    ]);

    vec![
        Recipe {
            id: "raspberry-caramel-white-chocolate".to_string(),
            name: "Raspberry Caramel & White Chocolate".to_string(),
            photo: None,
            category_id: "cookies".to_string(),
            batch_size: Decimal::from(5),
            ingredients: raspberry_ingredients,
            sub_recipes: vec![SubRecipe {
                id: "raspberry-caramel".to_string(),
                name: "Raspberry Caramel".to_string(),
                ingredients: vec![
                    grams("Caster sugar", 35),
                    Ingredient::new("Water", Decimal::from(20), "ml"),
                    grams("Unsalted butter", 30),
                    grams("Raspberry compound", 25),
                ],
                instructions: None,
                yield_amount: RecipeYield {
                    amount: Decimal::from(110),
                    unit: "g".to_string(),
                },
            }],
            final_build: FinalBuild {
                elements: vec![
                    element("Raspberry caramel", Decimal::from(120), true),
                    element("White chocolate slab", Decimal::from(120), false),
                    element("White chocolate drops/chips", Decimal::from(6), false),
                    element("Freeze dried raspberry", d(25, 2), false),
                ],
            },
            instructions: steps(&[
                "Make raspberry caramel first by heating sugar and water until golden",
                "Add butter and raspberry compound to caramel",
                "Prepare cookie dough with all main ingredients",
                "Shape cookies and add raspberry caramel filling",
                "Top with white chocolate slab and chips",
                "Finish with freeze dried raspberry pieces",
                "Bake according to standard cookie procedure",
            ]),
        },
        Recipe {
            id: "sticky-toffee-pudding".to_string(),
            name: "Sticky Toffee Pudding".to_string(),
            photo: Some("/biscoff carmel cookie 2 copy.png".to_string()),
            category_id: "cookies".to_string(),
            batch_size: Decimal::from(5),
            ingredients: cookie_base("Dark muscovado sugar"),
            sub_recipes: vec![SubRecipe {
                id: "sticky-toffee-sauce".to_string(),
                name: "Sticky Toffee Sauce".to_string(),
                ingredients: vec![
                    grams("Light brown sugar", 45),
                    grams("Salted butter", 13),
                    grams("Double cream", 54),
                    grams("Black treacle", 8),
                ],
                instructions: None,
                yield_amount: RecipeYield {
                    amount: Decimal::from(120),
                    unit: "g".to_string(),
                },
            }],
            final_build: FinalBuild {
                elements: vec![
                    element("Sticky toffee sauce (piped in)", Decimal::from(120), true),
                    element("Sticky toffee sauce (on top)", Decimal::from(90), true),
                    element("Golden syrup sponge crumbled", Decimal::from(48), false),
                    element("Chocolate digestive biscuit crumbled", Decimal::from(6), false),
                    element("Sliced date", Decimal::from(3), false),
                    element("Mini caramel fudge chunks", Decimal::from(9), false),
                ],
            },
            instructions: steps(&[
                "Prepare sticky toffee sauce by heating sugar until caramelized",
                "Add butter, cream, and treacle to make sauce",
                "Make cookie dough base with all main ingredients",
                "Pipe sticky toffee sauce into cookie centers",
                "Add crumbled sponge and digestive pieces",
                "Top with more sauce, dates, and fudge chunks",
                "Bake until golden and set",
            ]),
        },
        Recipe {
            id: "lemon-meringue".to_string(),
            name: "Lemon Meringue".to_string(),
            photo: None,
            category_id: "cookies".to_string(),
            batch_size: Decimal::from(5),
            ingredients: lemon_ingredients,
            sub_recipes: vec![],
            final_build: FinalBuild {
                elements: vec![
                    element("Lemon curd (piped in)", Decimal::from(150), false),
                    element("Lemon curd (piped on top)", Decimal::from(75), false),
                    element("Meringue pieces", Decimal::from(20), false),
                    element("Lemon biscuit crumb", d(15, 1), false),
                    element("Lemon zest", d(25, 2), false),
                ],
            },
            instructions: steps(&[
                "Prepare cookie dough with lemon zest and mixed peel",
                "Add mini marshmallows to the dough",
                "Shape cookies and create wells for filling",
                "Pipe lemon curd into centers and on top",
                "Add meringue pieces and biscuit crumb",
                "Finish with fresh lemon zest",
                "Bake until edges are golden",
            ]),
        },
    ]
}
