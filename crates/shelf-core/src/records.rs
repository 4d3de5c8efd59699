//! `Record` implementations for the shared record types

use crate::collection::{Record, RecordId};
use shelf_types::{Item, ItemPatch, NewItem};

impl Record for Item {
    type Draft = NewItem;
    type Patch = ItemPatch;
    const KIND: &'static str = "Item";

    fn id(&self) -> RecordId {
        self.id
    }

    fn from_draft(id: RecordId, draft: NewItem) -> Self {
        Item {
            id,
            name: draft.name,
            price: draft.price,
            is_offer: draft.is_offer,
        }
    }

    fn merge(&mut self, patch: ItemPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(is_offer) = patch.is_offer {
            self.is_offer = is_offer;
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{ResourceCollection, ShelfError};
    use shelf_types::{Item, ItemPatch, NewItem};
    use tokio_test::{assert_err, assert_ok};

    fn item(id: i64, name: &str, price: f64) -> Item {
        Item {
            id,
            name: name.to_string(),
            price,
            is_offer: false,
        }
    }

    #[test]
    fn test_item_lifecycle() {
        let mut items: ResourceCollection<Item> = ResourceCollection::new();

        assert_eq!(items.create(NewItem::new("A", 1.0)), item(1, "A", 1.0));
        assert_eq!(items.create(NewItem::new("B", 2.0)), item(2, "B", 2.0));

        let updated = assert_ok!(items.update(
            1,
            ItemPatch {
                price: Some(1.5),
                ..Default::default()
            },
        ));
        assert_eq!(updated, item(1, "A", 1.5));

        assert_ok!(items.delete(2));
        assert_eq!(items.list(), &[item(1, "A", 1.5)]);
    }

    #[test]
    fn test_empty_patch_is_noop() {
        let mut items: ResourceCollection<Item> = ResourceCollection::new();
        let created = items.create(NewItem {
            name: "A".to_string(),
            price: 3.0,
            is_offer: true,
        });

        let updated = assert_ok!(items.update(created.id, ItemPatch::default()));
        assert_eq!(updated, created);
    }

    #[test]
    fn test_item_not_found_message() {
        let items: ResourceCollection<Item> = ResourceCollection::new();
        let err = assert_err!(items.get(3));
        assert!(matches!(err, ShelfError::NotFound { kind: "Item", id: 3 }));
        assert_eq!(err.code(), "not_found");
    }
}
