use serde::{Deserialize, Serialize};

/// One merchandise line item held in the session basket.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BasketItem {
    pub item: String,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

/// Form body for POST /merchandise/add.
#[derive(Debug, Deserialize)]
pub struct AddItemForm {
    #[serde(rename = "_csrf")]
    pub csrf: String,
    pub item: String,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

impl AddItemForm {
    pub fn into_item(self) -> BasketItem {
        BasketItem {
            item: self.item,
            size: self.size,
            quantity: self.quantity,
        }
    }
}

/// Form body for POST /merchandise/remove/{item}.
#[derive(Debug, Deserialize)]
pub struct RemoveItemForm {
    #[serde(rename = "_csrf")]
    pub csrf: String,
}

/// Form body for POST /merchandise/order.
#[derive(Debug, Deserialize)]
pub struct OrderForm {
    #[serde(rename = "_csrf")]
    pub csrf: String,
    /// Address the confirmation email goes to.
    pub email: String,
    /// Who the order is for.
    pub order_for: String,
}

/// Form body for POST /login.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(rename = "_csrf")]
    pub csrf: String,
    pub nick_name: String,
    pub password: String,
}

/// Data the login page template would have received.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginPage {
    pub csrf_token: String,
    #[serde(default)]
    pub error: Option<String>,
}

/// Data the merchandise page template would have received.
#[derive(Debug, Serialize, Deserialize)]
pub struct MerchandisePage {
    pub csrf_token: String,
    pub basket: Vec<BasketItem>,
}

/// Outcome page shown after an order attempt.
#[derive(Debug, Serialize, Deserialize)]
pub struct PageMessage {
    pub message_header: String,
    pub message: String,
}
