use crate::auth::csrf;
use crate::core::error::SiteError;
use crate::core::state::AppState;
use crate::mail::client::OutboundEmail;
use crate::models::order::{AddItemForm, MerchandisePage, OrderForm, PageMessage, RemoveItemForm};
use crate::sessions::middleware::SessionToken;
use axum::{
    extract::{Path, State},
    response::{Json, Redirect},
    Extension, Form,
};
use std::sync::Arc;
use tracing::{error, info};

fn check_csrf(state: &AppState, token: &str, provided: &str) -> Result<(), SiteError> {
    let expected = state.sessions.csrf_token(token).ok_or(SiteError::CsrfMismatch)?;
    if !csrf::verify_token(provided, &expected) {
        return Err(SiteError::CsrfMismatch);
    }
    Ok(())
}

/// GET /merchandise
///
/// Current basket contents plus the CSRF token the forms need.
pub async fn view_handler(
    State(state): State<Arc<AppState>>,
    Extension(SessionToken(token)): Extension<SessionToken>,
) -> Result<Json<MerchandisePage>, SiteError> {
    let csrf_token = state.sessions.csrf_token(&token).ok_or(SiteError::NotFound)?;

    Ok(Json(MerchandisePage {
        csrf_token,
        basket: state.sessions.basket(&token),
    }))
}

/// POST /merchandise/add
///
/// Appends a line item to the session basket, creating the basket on first
/// use, then redirects back to the merchandise page.
pub async fn add_handler(
    State(state): State<Arc<AppState>>,
    Extension(SessionToken(token)): Extension<SessionToken>,
    Form(form): Form<AddItemForm>,
) -> Result<Redirect, SiteError> {
    check_csrf(&state, &token, &form.csrf)?;

    if form.item.trim().is_empty() {
        return Err(SiteError::Validation("item must not be empty".to_string()));
    }

    state.sessions.push_basket_item(&token, form.into_item());
    Ok(Redirect::to("/merchandise"))
}

/// POST /merchandise/remove/{item}
///
/// Removes the basket entry at the given index. An index beyond the current
/// length is a no-op; removing the last item deletes the basket entirely.
pub async fn remove_handler(
    State(state): State<Arc<AppState>>,
    Extension(SessionToken(token)): Extension<SessionToken>,
    Path(item): Path<usize>,
    Form(form): Form<RemoveItemForm>,
) -> Result<Redirect, SiteError> {
    check_csrf(&state, &token, &form.csrf)?;

    state.sessions.remove_basket_item(&token, item);
    Ok(Redirect::to("/merchandise"))
}

/// POST /merchandise/order
///
/// Two-phase email flow: the order request goes to the printers first (cc the
/// internal address). If that fails the basket is kept and the user sees an
/// error. On success the basket is cleared and a confirmation goes to the
/// customer; a failure there still counts as a partially successful order.
pub async fn order_handler(
    State(state): State<Arc<AppState>>,
    Extension(SessionToken(token)): Extension<SessionToken>,
    Form(form): Form<OrderForm>,
) -> Result<Json<PageMessage>, SiteError> {
    check_csrf(&state, &token, &form.csrf)?;

    let basket = state.sessions.basket(&token);
    if basket.is_empty() {
        return Err(SiteError::Validation("basket is empty".to_string()));
    }

    let mail_config = &state.config.mail;

    let to_printers = OutboundEmail {
        from: state.mailer.from_address(),
        to: &mail_config.printers_address,
        cc: Some(&mail_config.internal_address),
        subject: "Dojo Merchandise Order Request",
        order_from: &form.email,
        order_for: &form.order_for,
        basket: &basket,
    };

    if let Err(err) = state.mailer.send(&to_printers).await {
        error!(error = %err, "Failed to send order request email");
        return Ok(Json(PageMessage {
            message_header: "Uh oh :(".to_string(),
            message: "There was an error in placing your order! Please try again!".to_string(),
        }));
    }

    // The order is with the printers; from here on the basket is spent.
    state.sessions.take_basket(&token);
    info!(order_for = %form.order_for, items = basket.len(), "Order request sent to printers");

    let confirmation = OutboundEmail {
        from: state.mailer.from_address(),
        to: &form.email,
        cc: None,
        subject: "Dojo Merchandise Order Sent",
        order_from: &form.email,
        order_for: &form.order_for,
        basket: &basket,
    };

    if let Err(err) = state.mailer.send(&confirmation).await {
        error!(error = %err, "Failed to send order confirmation email");
        return Ok(Json(PageMessage {
            message_header: "Could be worse?! :|".to_string(),
            message: "Your order request was sent but you may not receive confirmation of your order :/"
                .to_string(),
        }));
    }

    Ok(Json(PageMessage {
        message_header: "Order Request Sent :D".to_string(),
        message: "Your order request was sent :D You should receive a confirmation e-mail shortly."
            .to_string(),
    }))
}
