use anyhow::Result;
use filekind_core::{Category, JsonShape};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct LabelListing {
    pub version: String,
    pub categories: Vec<Category>,
    pub json_shapes: Vec<JsonShape>,
}

impl LabelListing {
    pub fn current() -> Self {
        Self {
            version: filekind_core::version().to_string(),
            categories: Category::ALL.to_vec(),
            json_shapes: JsonShape::ALL.to_vec(),
        }
    }
}

/// List every label the classifiers can produce.
pub fn labels_command(json: bool) -> Result<()> {
    let listing = LabelListing::current();

    if json {
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    println!("filekind v{}", listing.version);
    println!("Categories:");
    for category in &listing.categories {
        println!("- {}", category);
    }
    println!("JSON shapes:");
    for shape in &listing.json_shapes {
        println!("- {}", shape);
    }

    Ok(())
}
