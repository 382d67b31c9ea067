//! Order persistence, split between the order header and its lines.

mod items;
mod orders;

pub(crate) use items::PgOrderItemsRepository;
pub(crate) use orders::PgOrdersRepository;
