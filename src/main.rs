//! DecorNest command line storefront

use std::{
    fs,
    io::{self, Write},
};

use anyhow::{Context, anyhow};
use tracing::debug;

use decornest::{
    cart::CartStore,
    catalog::{Catalog, CatalogQuery},
    checkout::{CheckoutLedger, CheckoutSnapshot, OrderId, PaymentAmount, ShippingPolicy},
    fixtures::{Fixture, catalog_from_yaml},
    notifications::{Notifier, RecordingNotifier, Toast},
    products::ProductId,
    receipt,
    storage::{FileStore, KeyValueStore},
};

use crate::config::{CartCommand, Command, Config, ProductsArgs};

mod config;
mod observability;

fn main() -> anyhow::Result<()> {
    let config = Config::load().unwrap_or_else(|err| err.exit());

    observability::init_subscriber(&config.logging)?;

    let catalog = load_catalog(&config)?;

    let mut store = FileStore::open(&config.store.data_dir)
        .with_context(|| format!("opening data directory {}", config.store.data_dir.display()))?;

    if let Some(quota) = config.store.storage_quota {
        store = store.with_quota(quota);
    }

    let notifier = RecordingNotifier::new();

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let mut shop = Shop {
        catalog: &catalog,
        cart: CartStore::load_with_notifier(&store, &notifier),
        ledger: CheckoutLedger::load(&store)
            .with_notifier(&notifier)
            .with_shipping_policy(ShippingPolicy::flat(config.shop.shipping_fee)),
    };

    let outcome = shop.run(config.command, &mut out);

    write_toasts(&mut out, notifier.take())?;

    outcome
}

fn load_catalog(config: &Config) -> anyhow::Result<Catalog> {
    let Some(path) = &config.shop.catalog else {
        return Ok(Fixture::bundled_catalog()?);
    };

    debug!(path = %path.display(), "loading catalog");

    let contents =
        fs::read_to_string(path).with_context(|| format!("reading catalog {}", path.display()))?;

    catalog_from_yaml(&contents).with_context(|| format!("parsing catalog {}", path.display()))
}

/// One command's view of the storefront.
struct Shop<'a, S, N> {
    catalog: &'a Catalog,
    cart: CartStore<S, N>,
    ledger: CheckoutLedger<S, N>,
}

impl<S: KeyValueStore, N: Notifier> Shop<'_, S, N> {
    fn run(&mut self, command: Command, out: &mut impl Write) -> anyhow::Result<()> {
        match command {
            Command::Products(args) => self.products(&args, out),
            Command::Cart(action) => self.cart(action, out),
            Command::Checkout => self.checkout(out),
            Command::Pay { amount } => self.pay(amount.as_deref(), out),
            Command::Orders { id } => self.orders(id, out),
        }
    }

    fn products(&self, args: &ProductsArgs, out: &mut impl Write) -> anyhow::Result<()> {
        let query = CatalogQuery {
            category: CatalogQuery::parse_category(&args.category)?,
            price_range: CatalogQuery::parse_price_range(&args.price)?,
            sort: args.sort.parse()?,
            page: args.page,
        };

        receipt::write_products(out, &self.catalog.query(&query))?;

        Ok(())
    }

    fn cart(&mut self, action: CartCommand, out: &mut impl Write) -> anyhow::Result<()> {
        match action {
            CartCommand::Show => {}
            CartCommand::Add { id } => {
                let product = self
                    .catalog
                    .product(ProductId::new(id))
                    .ok_or_else(|| anyhow!("no product with id {id}"))?;

                self.cart.add_item(product);
            }
            CartCommand::Remove { id } => self.cart.remove_item(ProductId::new(id)),
            CartCommand::Update { id, quantity } => {
                self.cart.update_quantity(ProductId::new(id), quantity);
            }
            CartCommand::Clear => self.cart.clear_cart(),
        }

        let summary = CheckoutSnapshot::from_cart(self.cart.cart(), self.ledger.shipping_policy());

        receipt::write_summary(out, &summary)?;

        Ok(())
    }

    fn checkout(&mut self, out: &mut impl Write) -> anyhow::Result<()> {
        if self.cart.cart().is_empty() {
            writeln!(out, "\nYour cart is empty.\n")?;

            return Ok(());
        }

        let snapshot = self.ledger.begin_checkout(self.cart.cart());

        receipt::write_summary(&mut *out, &snapshot)?;

        writeln!(out, " Run `decornest pay` to complete payment.\n")?;

        Ok(())
    }

    fn pay(&mut self, amount: Option<&str>, out: &mut impl Write) -> anyhow::Result<()> {
        let paid = match amount {
            Some(input) => PaymentAmount::parse(input)?,
            None => PaymentAmount::new(self.ledger.load_pending_amount(self.cart.cart()))
                .context("nothing to pay for")?,
        };

        let order = self.ledger.complete_order(paid.amount(), &mut self.cart)?;

        receipt::write_order(out, &order)?;

        Ok(())
    }

    fn orders(&self, id: Option<u64>, out: &mut impl Write) -> anyhow::Result<()> {
        match id {
            None => receipt::write_orders(out, self.ledger.orders())?,
            Some(id) => {
                let order = self
                    .ledger
                    .order(OrderId::new(id))
                    .ok_or_else(|| anyhow!("no order with id {id}"))?;

                receipt::write_order(out, order)?;
            }
        }

        Ok(())
    }
}

fn write_toasts(out: &mut impl Write, toasts: Vec<Toast>) -> io::Result<()> {
    for toast in toasts {
        let marker = if toast.is_destructive() { "!" } else { "*" };

        writeln!(out, " {marker} {}: {}", toast.title, toast.description)?;
    }

    Ok(())
}
