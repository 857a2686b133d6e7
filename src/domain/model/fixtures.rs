//! Fixed catalog data: the houses collection seed and the read-only plants list.

use super::{CatalogItem, PlantItem};

const PLACEHOLDER_IMAGE: &str = "https://machine8822.github.io/project/part6/images/placeholder.jpg";

// (name, description, price, rating, image)
type FixtureRow = (&'static str, &'static str, f64, f64, &'static str);

const HOUSES: &[FixtureRow] = &[
    ("Mower", "Useful for cutting the grass when it gets too tall.", 129.99, 4.2, "images/mower.png"),
    ("Rake", "Useful for moving leaves into a pile.", 9.99, 3.4, "images/rake.png"),
    ("Edger", "Useful for trimming up the edge of the grass.", 99.99, 4.4, "images/edger.png"),
    ("Leaf Blower", "Useful for blowing leaves wherever you need to.", 38.99, 3.3, "images/leafblower.png"),
    (
        "Spreader",
        "Useful for spreading pesticide and other chemicals over a wide area.",
        49.99,
        2.7,
        "images/spreader.png",
    ),
];

const PLANTS: &[FixtureRow] = &[
    (
        "Mulch",
        "Useful for keep the soil a good temperature and to prevent weeds from growing.",
        3.99,
        4.2,
        "images/mulch.png",
    ),
    ("Pine Straw", "Useful for fertilizing grass.", 4.99, 3.4, "images/straw.png"),
    ("Pine Tree", "Tall, bushy tree. Commonly used as Christmas trees.", 32.99, 4.4, "images/tree.png"),
    ("Flowers", "Roses are our speciality, especially around this time.", 6.99, 3.3, "images/flower.jpg"),
];

fn materialize(rows: &[FixtureRow]) -> Vec<CatalogItem> {
    rows.iter()
        .enumerate()
        .map(|(idx, (name, description, price, rating, image))| CatalogItem {
            id: (idx + 1).to_string(),
            name: name.to_string(),
            description: description.to_string(),
            price: *price,
            rating: *rating,
            main_image: None,
            img1: Some(image.to_string()),
            img2: Some(PLACEHOLDER_IMAGE.to_string()),
        })
        .collect()
}

/// Initial houses loaded into the in-memory store. These bypass validation.
pub fn seed_houses() -> Vec<CatalogItem> {
    materialize(HOUSES)
}

/// The static plants list, identical on every call.
pub fn plant_fixture() -> Vec<PlantItem> {
    materialize(PLANTS)
}
