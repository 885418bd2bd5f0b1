//! `cenphone demo` - drive the full storefront flow end to end.
//!
//! Registers a shopper against a fresh embedded store, logs in, configures
//! a phone from the catalog, walks the four checkout checkpoints, then
//! reviews and cancels the order.

use chrono::{Datelike, Months, Utc};
use secrecy::SecretString;

use cenphone_storefront::Result;
use cenphone_storefront::checkout::{CardDetails, CheckoutWorkflow, DeliveryDetails, PaymentMethod};
use cenphone_storefront::config::Config;
use cenphone_storefront::db::MemoryStore;
use cenphone_storefront::models::Session;
use cenphone_storefront::services::accounts::{AccountDirectory, NewAccount};
use cenphone_storefront::services::catalog;
use cenphone_storefront::services::orders::OrderLedger;

const DEMO_EMAIL: &str = "ashna@example.com";
const DEMO_PASSWORD: &str = "secret1";

pub fn run() -> Result<()> {
    let config = Config::from_env()?;
    let store = MemoryStore::new();

    // Register and authenticate
    let directory = AccountDirectory::new(&store, &config);
    let user = directory.register(NewAccount {
        full_name: "Ashna Paul".to_owned(),
        address: "941 Progress Ave".to_owned(),
        city: "Toronto".to_owned(),
        province: "Ontario".to_owned(),
        country: "Canada".to_owned(),
        telephone: "+1 4165550119".to_owned(),
        email: DEMO_EMAIL.to_owned(),
        username: "ashna".to_owned(),
        password: SecretString::from(DEMO_PASSWORD),
        confirm_password: SecretString::from(DEMO_PASSWORD),
    })?;
    tracing::info!("Registered {} ({})", user.full_name, user.email);

    let user = directory.authenticate(DEMO_EMAIL, &SecretString::from(DEMO_PASSWORD))?;
    let mut session = Session::new();
    session.login(&user);
    tracing::info!("Logged in as {}", user.username);

    // Browse the catalog the way the selection screens do
    let brand = "iPhone";
    let model = catalog::find_model(brand, "iPhone 15").map_or("iPhone 15", |m| m.name);
    let storage = "128 GB";
    let price = catalog::price_for_storage(storage).unwrap_or("$899");
    tracing::info!("Selected {brand} {model}, {storage}, {price}");

    // Walk the four checkout checkpoints
    let mut checkout = CheckoutWorkflow::new(&store, &config, &session);
    let product = checkout.select_product(brand, model, "Red", storage, price)?;
    tracing::info!("Captured product {} at {}", product.id, product.price);

    checkout.confirm_delivery(DeliveryDetails {
        street_address: user.address.clone(),
        city: user.city.clone(),
        province: user.province.clone(),
        country: user.country.clone(),
        terms_accepted: true,
    })?;

    let expiry = Utc::now() + Months::new(24);
    checkout.submit_payment(&PaymentMethod::CreditCard(CardDetails {
        holder_name: user.full_name.clone(),
        number: "4111 1111 1111 1111".to_owned(),
        expiry: format!("{:02}/{:02}", expiry.month(), expiry.year() % 100),
        cvv: "123".to_owned(),
    }))?;

    let order = checkout.place_order()?;
    tracing::info!(
        "Order {} placed: {} for {}",
        order.id,
        order.status,
        order.total_amount
    );

    // Review past orders, then cancel inside the 24-hour window
    let ledger = OrderLedger::new(&store, &config);
    let orders = ledger.orders_for_user(user.id)?;
    tracing::info!("Previous orders: {}", orders.len());

    let found = ledger.search_orders(user.id, "iphone")?;
    tracing::info!("Orders matching \"iphone\": {}", found.len());

    ledger.cancel_order(order.id)?;
    let canceled = ledger.get_order(order.id)?;
    tracing::info!("Order {} is now {}", canceled.id, canceled.status);

    session.logout();
    tracing::info!("Logged out");
    Ok(())
}
