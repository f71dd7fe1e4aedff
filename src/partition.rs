use crate::product::{PricedProduct, Product};

/// Loaded records split by discount status, each side in load order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Partition {
    pub discounted: Vec<Product>,
    pub other: Vec<Product>,
}

/// Discounted iff `percentage > 0`, everything else is "other".
pub fn partition(records: Vec<PricedProduct>) -> Partition {
    let (discounted, other): (Vec<_>, Vec<_>) =
        records.into_iter().partition(PricedProduct::is_discounted);

    Partition {
        discounted: discounted.into_iter().map(|r| r.product).collect(),
        other: other.into_iter().map(|r| r.product).collect(),
    }
}
