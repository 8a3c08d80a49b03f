//! The café's published menu, served by `GET /api/menu`.
//!
//! Category order here is the order the site displays and searches in.

use serde::ser::{Serialize, SerializeMap, SerializeStruct, Serializer};

pub struct MenuEntry {
    pub name: &'static str,
    pub price: Option<u32>,
    pub description: Option<&'static str>,
    pub dietary: &'static [&'static str],
}

const BOTH: &[&str] = &["veg", "non-veg"];

const fn item(name: &'static str, price: u32) -> MenuEntry {
    MenuEntry {
        name,
        price: Some(price),
        description: None,
        dietary: &[],
    }
}

const fn unpriced(name: &'static str) -> MenuEntry {
    MenuEntry {
        name,
        price: None,
        description: None,
        dietary: &[],
    }
}

const fn described(name: &'static str, price: u32, description: &'static str) -> MenuEntry {
    MenuEntry {
        name,
        price: Some(price),
        description: Some(description),
        dietary: &[],
    }
}

/// Available as both a veg and a non-veg preparation.
const fn either(name: &'static str, price: u32) -> MenuEntry {
    MenuEntry {
        name,
        price: Some(price),
        description: None,
        dietary: BOTH,
    }
}

pub static MENU: &[(&str, &[MenuEntry])] = &[
    (
        "Fresh Squeeze",
        &[
            item("Watermelon Juice", 250),
            item("Orange Juice", 320),
            item("Classic Lemonade", 250),
            item("ABC", 320),
        ],
    ),
    (
        "Cold",
        &[
            item("Iced Americano", 290),
            item("Iced Latte", 350),
            item("Espresso Tonic", 280),
            item("Iced Mocha", 320),
            item("Classic Cold Coffee", 350),
            item("Cold Brew", 290),
            item("Vietnamese Mocha Cloud", 350),
            item("Cold Brew Tonic", 350),
            item("Cold Brew Juice", 350),
        ],
    ),
    (
        "Hot",
        &[
            item("Espresso", 210),
            item("Macchiato", 290),
            item("Americano", 290),
            item("Cortado", 350),
            item("Flat White", 350),
            item("Café Latte", 290),
            item("Cappuccino", 290),
            item("Mocha", 290),
            item("Hot Chocolate", 350),
        ],
    ),
    (
        "Specials",
        &[
            item("Vietnamese Coffee", 380),
            item("Mazagran (Portugal)", 380),
            item("Matcha Latte", 350),
            item("Mango Matcha Latte", 450),
            item("Tiramisu Iced Latte", 520),
        ],
    ),
    (
        "Manual Brew",
        &[
            item("French Press", 400),
            item("Pour Over", 380),
        ],
    ),
    (
        "Affogato",
        &[
            item("Chocolate Malabar", 420),
            item("Vanilla", 320),
            item("Salted Caramel", 350),
        ],
    ),
    (
        "Spill The Tea",
        &[
            item("Masala Chai", 220),
            item("Ginger Honey Lemon Tea", 200),
            item("Lemon Iced Tea", 260),
        ],
    ),
    (
        "All Day Breakfast",
        &[
            item("Turkish Eggs", 420),
            item("Chorizo Egg Benedict", 480),
            item("French Toast", 430),
            item("French Omelette", 450),
            item("Ros Omelette", 450),
            item("Fika Full House Brekkin", 590),
            item("Shake Shake Shuka", 430),
            item("Sunny Side Up", 420),
            item("Classic Scrambled Eggs", 400),
            item("English Breakfast Platter", 490),
        ],
    ),
    (
        "Wafflin Around",
        &[
            item("Classic Waffles", 380),
            item("Sea Salt Chocolate", 450),
        ],
    ),
    (
        "Ssup Hot Cakes",
        &[
            item("Tiramisu Pancake", 450),
            item("Banana Brulee Pancake", 430),
            described("Classic Pancake", 420, "with choice of honey maple"),
        ],
    ),
    (
        "Burgers",
        &[
            item("Cottage Surprise", 520),
            item("Veg Mania Burger", 520),
            item("Nashville Fried Chicken", 540),
            item("American Cowboy", 540),
        ],
    ),
    (
        "House Classics",
        &[
            item("Bombay Bachelor Sandwich", 320),
            item("Avocado Caprese", 475),
            item("Mustard Chicken", 450),
            item("Vegetable Club", 350),
            item("Chicken Lemon Herb", 650),
        ],
    ),
    (
        "Toasties",
        &[
            item("Cucumber Cheese Toast", 320),
            item("PBC Toast", 350),
            item("Avo Guacamole Toast", 480),
            item("Shrooms Toast", 380),
            item("Panzanella", 380),
            item("Nutella Banana Toastie", 380),
            item("Chilli Cheese Garlic", 380),
        ],
    ),
    (
        "Sourdough Sammy",
        &[
            item("Korean Sourdough Sammy", 520),
            item("Birria Chicken Cheese Skirt", 540),
            item("Mushroom Caramelized Onion Grilled Cheese", 480),
        ],
    ),
    (
        "Smoothie Bowl",
        &[
            item("Tropical Mango Blueberry", 440),
            item("Berry Blast", 460),
            item("Coco Peanut (Vegan)", 480),
            item("Espresso Dates", 460),
        ],
    ),
    (
        "Pizza Palooza",
        &[
            item("Classic Margarita", 620),
            item("Farmville", 620),
            item("Greek Souvlaki Chicken", 650),
            item("Classic Pepperoni / Chorizo Hot Honey", 750),
            item("Goat", 680),
        ],
    ),
    (
        "Bowls",
        &[
            described("Burrito", 450, "Mexican vegetarian"),
            either("Hakka Noodles", 450),
            either("Chef Special Wok Noodles", 480),
            either("Manchurian", 420),
        ],
    ),
    (
        "Pasta",
        &[
            either("Penné Allá Romanía", 400),
            either("Penné Rossé Vivo", 450),
            either("Penné Rosé", 430),
            either("Penné Al Basilicó", 420),
            either("Spaghetti Aglio É Olio Classico", 530),
            either("Spaghetti Alla Créme", 550),
            either("Spaghetti Al Pomodoro", 530),
            either("Mac And Cheese", 420),
        ],
    ),
    (
        "Tapas",
        &[
            item("Creole Lime Chicken Bite", 420),
            either("Skillet Nachos", 440),
            item("Pumpkin Borani", 470),
            item("Mediterranean Hummus", 450),
            either("Mezze Platter", 550),
        ],
    ),
    (
        "Mighty Munchies",
        &[
            item("Korean Cream Cheese Garlic Bun", 350),
            item("Cracked Potatoes", 350),
            item("Togarashi Avo Taco With Spicy Pina Salsa", 480),
            item("Queso Fries", 420),
            item("Fries Carnival", 430),
            item("KFC", 450),
            item("Jalapeno Cheese Bombs", 420),
            item("Vegetable Cigar Roll", 370),
            item("Chicken Cigar Roll", 450),
            item("Classic Fries", 350),
            item("Chicken Nuggets", 450),
            item("Truffle Fries", 470),
        ],
    ),
    (
        "Salad Bar",
        &[
            item("Waldorf Salad", 450),
            item("Caesar Salad", 480),
            item("Mediterranean Chickpea Salad", 450),
            item("Melon Bliss Salad", 360),
            item("Quinoa & Grilled Cottage Cheese", 380),
            item("Quinoa & Smoked Chicken", 380),
        ],
    ),
    (
        "Indian Affair",
        &[
            item("Shahi Paneer", 450),
            item("Subz Miloni", 390),
            item("Kadhai Paneer", 420),
            item("Murgh Makhani", 620),
            item("Kadhai Chicken", 480),
            item("Railway Chicken Curry", 480),
            item("Nizami Dal", 420),
            item("Dal Makhani", 470),
        ],
    ),
    (
        "Sides and Staples",
        &[
            item("Roasted Papad (2 PCS)", 55),
            item("Green Salad", 190),
            item("Pudina Raita", 175),
            item("Boondi Raita", 159),
            item("Mix Veg Raita", 199),
            item("Tawa Roti", 65),
            item("Butter Roti", 75),
            item("Tawa Paratha", 100),
            item("Laccha Paratha", 150),
            item("Steamed Rice", 240),
            item("Jeera Rice", 220),
            item("Vegetable Pulao", 250),
            item("Masala Khichdi", 320),
        ],
    ),
    (
        "Desserts",
        &[
            unpriced("Walnut & Banana Cake"),
            unpriced("Chocolate Marble Cake"),
            unpriced("Chocolate Muffin"),
            unpriced("Tiramisu"),
            unpriced("Sea Salt Chocolate Cookies"),
            unpriced("Peanut Butter Cookies"),
        ],
    ),
    (
        "Pawsome",
        &[
            item("Boiled Chicken", 250),
            item("Steamed Rice With Milk", 250),
            item("Boiled Eggs With Rice", 250),
            item("Boiled Vegetable Bowl", 200),
        ],
    ),
];

/// Serializes `MENU` as a JSON object keyed by category, preserving order.
pub struct Categories;

impl Serialize for Categories {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(MENU.len()))?;
        for (category, items) in MENU {
            map.serialize_entry(category, items)?;
        }
        map.end()
    }
}

impl Serialize for MenuEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = 2 + usize::from(self.description.is_some()) + usize::from(!self.dietary.is_empty());
        let mut entry = serializer.serialize_struct("MenuEntry", len)?;
        entry.serialize_field("name", self.name)?;
        entry.serialize_field("price", &self.price)?;
        if let Some(description) = self.description {
            entry.serialize_field("description", description)?;
        }
        if !self.dietary.is_empty() {
            entry.serialize_field("dietary", self.dietary)?;
        }
        entry.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_serializes_in_published_order() {
        let json = serde_json::to_string(&Categories).unwrap();
        let fresh = json.find("\"Fresh Squeeze\"").unwrap();
        let cold = json.find("\"Cold\"").unwrap();
        let pawsome = json.find("\"Pawsome\"").unwrap();
        assert!(fresh < cold && cold < pawsome);
    }

    #[test]
    fn unpriced_items_send_null_price() {
        let value = serde_json::to_value(&Categories).unwrap();
        assert!(value["Desserts"][0]["price"].is_null());
        assert_eq!(value["Bowls"][1]["dietary"], serde_json::json!(["veg", "non-veg"]));
        assert_eq!(value["Bowls"][0]["description"], "Mexican vegetarian");
        assert!(value["Hot"][0].get("dietary").is_none());
    }
}
