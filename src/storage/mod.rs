//! Storage - in-memory maps keyed by synthetic ids
//!
//! `Storage` is the seam the services and routes talk to. `MemStorage` keeps
//! every table behind one mutex and lives for the process lifetime.

mod fixtures;

pub use fixtures::{EXAMPLE_OWNER, PIXEL_FOXES_SLUG};

use chrono::{Duration, Utc};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

use crate::core::constants::{inscriptions, models};
use crate::core::model::*;
use crate::error::{MinterError, MinterResult};

pub trait Storage: Send + Sync {
    // Users
    fn user(&self, id: Id) -> MinterResult<Option<User>>;
    fn user_by_username(&self, username: &str) -> MinterResult<Option<User>>;
    fn create_user(&self, user: NewUser) -> MinterResult<User>;

    // Collections
    fn collections(&self) -> MinterResult<Vec<Collection>>;
    fn collection(&self, id: Id) -> MinterResult<Option<Collection>>;
    fn collection_by_name(&self, name: &str) -> MinterResult<Option<Collection>>;
    fn collection_by_slug(&self, slug: &str) -> MinterResult<Option<Collection>>;
    fn create_collection(&self, collection: NewCollection) -> MinterResult<Collection>;
    fn update_collection(&self, id: Id, update: CollectionUpdate) -> MinterResult<Option<Collection>>;

    // Ordinals
    /// Look up by numeric id or inscription id.
    fn ordinal(&self, reference: &str) -> MinterResult<Option<Ordinal>>;
    fn ordinal_by_inscription(&self, inscription_id: &str) -> MinterResult<Option<Ordinal>>;
    fn create_ordinal(&self, ordinal: NewOrdinal) -> MinterResult<Ordinal>;
    /// True when the ordinal is unknown, owner equality otherwise.
    fn validate_ownership(&self, reference: &str, wallet: &str) -> MinterResult<bool>;

    // 3D ordinals
    fn three_d(&self, id: Id) -> MinterResult<Option<ThreeDOrdinal>>;
    fn create_three_d(&self, three_d: NewThreeD) -> MinterResult<ThreeDOrdinal>;
    /// Existing 3D ordinal for the same owner and source, else a new one; checked and
    /// inserted under one lock. The flag is true when a record was created.
    fn three_d_for_source(&self, three_d: NewThreeD) -> MinterResult<(ThreeDOrdinal, bool)>;
    fn update_three_d(&self, id: Id, update: ThreeDUpdate) -> MinterResult<Option<ThreeDOrdinal>>;
    fn three_d_by_owner(&self, owner: &str) -> MinterResult<Vec<ThreeDOrdinal>>;
    fn recent_three_d(&self, limit: usize) -> MinterResult<Vec<ThreeDOrdinal>>;
    fn search_three_d(&self, query: &str) -> MinterResult<Vec<ThreeDOrdinal>>;
    fn example_three_d(&self) -> MinterResult<Vec<ThreeDOrdinal>>;

    // Transactions
    fn create_transaction(&self, tx: NewTransaction) -> MinterResult<MintingTransaction>;
    fn transaction_by_three_d(&self, three_d_id: Id) -> MinterResult<Option<MintingTransaction>>;
}

#[derive(Default)]
struct Tables {
    users: BTreeMap<Id, User>,
    collections: BTreeMap<Id, Collection>,
    ordinals: BTreeMap<Id, Ordinal>,
    three_d: BTreeMap<Id, ThreeDOrdinal>,
    transactions: BTreeMap<Id, MintingTransaction>,
    examples: Vec<Id>,
}

impl Tables {
    fn next_id<V>(map: &BTreeMap<Id, V>) -> Id {
        map.keys().next_back().map(|k| k + 1).unwrap_or(1)
    }

    fn ordinal_ref(&self, reference: &str) -> Option<&Ordinal> {
        let reference = reference.trim();
        if let Ok(id) = reference.parse::<Id>() {
            if let Some(o) = self.ordinals.get(&id) { return Some(o); }
        }
        self.ordinals.values().find(|o| o.inscription_id == reference)
    }

    fn insert_three_d(&mut self, new: NewThreeD) -> MinterResult<ThreeDOrdinal> {
        if self.three_d.values().any(|x| x.inscription_id == new.inscription_id) {
            return Err(MinterError::Duplicate(format!("inscription {}", new.inscription_id)));
        }
        let id = Tables::next_id(&self.three_d);
        let profile = new.quality.profile();
        let record = ThreeDOrdinal {
            id,
            inscription_id: new.inscription_id,
            inscription_number: new.inscription_number,
            model_url: new.model_url,
            polygon_count: profile.polygon_count,
            texture_resolution: profile.texture_resolution.into(),
            file_size: profile.file_size,
            format: new.format,
            quality: new.quality,
            original_ordinal_id: new.original_ordinal_id,
            owner: new.owner,
            collection_id: new.collection_id,
            name: new.name,
            created_at: Utc::now(),
        };
        self.three_d.insert(id, record.clone());
        Ok(record)
    }
}

/// Process-lifetime store. `new()` seeds fixtures; `empty()` does not.
pub struct MemStorage {
    tables: Mutex<Tables>,
}

impl Default for MemStorage {
    fn default() -> Self { Self::new() }
}

impl MemStorage {
    pub fn empty() -> Self { Self { tables: Mutex::new(Tables::default()) } }

    pub fn new() -> Self {
        let storage = Self::empty();
        if let Err(e) = storage.seed() {
            tracing::warn!("fixture seeding failed: {}", e);
        }
        storage
    }

    fn lock(&self) -> MinterResult<MutexGuard<'_, Tables>> {
        self.tables.lock().map_err(|_| MinterError::Poisoned)
    }

    fn seed(&self) -> MinterResult<()> {
        let mut collection_ids = Vec::new();
        for c in fixtures::collections() {
            collection_ids.push(self.create_collection(c)?.id);
        }
        let Some(&collection_id) = collection_ids.first() else { return Ok(()) };

        let now = Utc::now();
        for (i, ex) in fixtures::EXAMPLES.iter().enumerate() {
            let ordinal = self.create_ordinal(NewOrdinal {
                inscription_id: ex.inscription_id.into(),
                inscription_number: inscriptions::ORDINAL_BASE + i as u64,
                content: fixtures::PIXEL_FOXES_IMAGE.into(),
                content_type: "image/png".into(),
                owner: EXAMPLE_OWNER.into(),
                collection_id,
            })?;
            let three_d = self.create_three_d(NewThreeD {
                inscription_id: format!("{}{}", inscriptions::THREE_D_PREFIX, ex.inscription_id),
                inscription_number: inscriptions::THREE_D_BASE + i as u64,
                model_url: fixtures::example_model_url(i).into(),
                quality: ex.quality,
                format: models::FORMAT.into(),
                original_ordinal_id: ordinal.id,
                owner: EXAMPLE_OWNER.into(),
                collection_id,
                name: Some(ex.name.into()),
            })?;
            let mut t = self.lock()?;
            if let Some(record) = t.three_d.get_mut(&three_d.id) {
                record.created_at = now - Duration::days(ex.minted_days_ago);
            }
            t.examples.push(three_d.id);
        }
        debug!(collections = collection_ids.len(), examples = fixtures::EXAMPLES.len(), "storage seeded");
        Ok(())
    }
}

impl Storage for MemStorage {
    fn user(&self, id: Id) -> MinterResult<Option<User>> {
        Ok(self.lock()?.users.get(&id).cloned())
    }

    fn user_by_username(&self, username: &str) -> MinterResult<Option<User>> {
        Ok(self.lock()?.users.values().find(|u| u.username == username).cloned())
    }

    fn create_user(&self, user: NewUser) -> MinterResult<User> {
        let mut t = self.lock()?;
        if t.users.values().any(|u| u.username == user.username) {
            return Err(MinterError::Duplicate(format!("user {}", user.username)));
        }
        let id = Tables::next_id(&t.users);
        let user = User { id, username: user.username, password: user.password };
        t.users.insert(id, user.clone());
        Ok(user)
    }

    fn collections(&self) -> MinterResult<Vec<Collection>> {
        Ok(self.lock()?.collections.values().cloned().collect())
    }

    fn collection(&self, id: Id) -> MinterResult<Option<Collection>> {
        Ok(self.lock()?.collections.get(&id).cloned())
    }

    fn collection_by_name(&self, name: &str) -> MinterResult<Option<Collection>> {
        Ok(self.lock()?.collections.values().find(|c| c.name == name).cloned())
    }

    fn collection_by_slug(&self, slug: &str) -> MinterResult<Option<Collection>> {
        Ok(self.lock()?.collections.values().find(|c| c.collection_id == slug).cloned())
    }

    fn create_collection(&self, collection: NewCollection) -> MinterResult<Collection> {
        let mut t = self.lock()?;
        if t.collections.values().any(|c| c.name == collection.name) {
            return Err(MinterError::Duplicate(format!("collection {}", collection.name)));
        }
        let id = Tables::next_id(&t.collections);
        let collection = collection.into_collection(id);
        t.collections.insert(id, collection.clone());
        Ok(collection)
    }

    fn update_collection(&self, id: Id, update: CollectionUpdate) -> MinterResult<Option<Collection>> {
        let mut t = self.lock()?;
        Ok(t.collections.get_mut(&id).map(|c| {
            update.apply(c);
            c.clone()
        }))
    }

    fn ordinal(&self, reference: &str) -> MinterResult<Option<Ordinal>> {
        Ok(self.lock()?.ordinal_ref(reference).cloned())
    }

    fn ordinal_by_inscription(&self, inscription_id: &str) -> MinterResult<Option<Ordinal>> {
        Ok(self.lock()?.ordinals.values().find(|o| o.inscription_id == inscription_id).cloned())
    }

    fn create_ordinal(&self, ordinal: NewOrdinal) -> MinterResult<Ordinal> {
        let mut t = self.lock()?;
        if t.ordinals.values().any(|o| o.inscription_id == ordinal.inscription_id) {
            return Err(MinterError::Duplicate(format!("inscription {}", ordinal.inscription_id)));
        }
        let id = Tables::next_id(&t.ordinals);
        let ordinal = Ordinal {
            id,
            inscription_id: ordinal.inscription_id,
            inscription_number: ordinal.inscription_number,
            content: ordinal.content,
            content_type: ordinal.content_type,
            owner: ordinal.owner,
            collection_id: ordinal.collection_id,
            created_at: Utc::now(),
        };
        t.ordinals.insert(id, ordinal.clone());
        Ok(ordinal)
    }

    fn validate_ownership(&self, reference: &str, wallet: &str) -> MinterResult<bool> {
        Ok(self.lock()?.ordinal_ref(reference).map(|o| o.owner == wallet).unwrap_or(true))
    }

    fn three_d(&self, id: Id) -> MinterResult<Option<ThreeDOrdinal>> {
        Ok(self.lock()?.three_d.get(&id).cloned())
    }

    fn create_three_d(&self, new: NewThreeD) -> MinterResult<ThreeDOrdinal> {
        self.lock()?.insert_three_d(new)
    }

    fn three_d_for_source(&self, new: NewThreeD) -> MinterResult<(ThreeDOrdinal, bool)> {
        let mut t = self.lock()?;
        let existing = t.three_d.values()
            .find(|x| x.owner == new.owner && x.original_ordinal_id == new.original_ordinal_id)
            .cloned();
        match existing {
            Some(x) => Ok((x, false)),
            None => Ok((t.insert_three_d(new)?, true)),
        }
    }

    fn update_three_d(&self, id: Id, update: ThreeDUpdate) -> MinterResult<Option<ThreeDOrdinal>> {
        let mut t = self.lock()?;
        Ok(t.three_d.get_mut(&id).map(|x| {
            update.apply(x);
            x.clone()
        }))
    }

    fn three_d_by_owner(&self, owner: &str) -> MinterResult<Vec<ThreeDOrdinal>> {
        Ok(self.lock()?.three_d.values().filter(|x| x.owner == owner).cloned().collect())
    }

    fn recent_three_d(&self, limit: usize) -> MinterResult<Vec<ThreeDOrdinal>> {
        let mut all: Vec<_> = self.lock()?.three_d.values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        all.truncate(limit);
        Ok(all)
    }

    fn search_three_d(&self, query: &str) -> MinterResult<Vec<ThreeDOrdinal>> {
        let q = query.to_lowercase();
        let hit = |s: &str| s.to_lowercase().contains(&q);
        Ok(self.lock()?.three_d.values()
            .filter(|x| hit(&x.inscription_id) || hit(&x.owner) || x.name.as_deref().map(hit).unwrap_or(false))
            .cloned()
            .collect())
    }

    fn example_three_d(&self) -> MinterResult<Vec<ThreeDOrdinal>> {
        let t = self.lock()?;
        Ok(t.examples.iter().filter_map(|id| t.three_d.get(id).cloned()).collect())
    }

    fn create_transaction(&self, tx: NewTransaction) -> MinterResult<MintingTransaction> {
        let mut t = self.lock()?;
        let id = Tables::next_id(&t.transactions);
        let record = MintingTransaction {
            id,
            transaction_id: tx.transaction_id,
            status: tx.status,
            inscription_number: tx.inscription_number,
            ordinal_id: tx.ordinal_id,
            three_d_ordinal_id: tx.three_d_ordinal_id,
            owner: tx.owner,
            fee: tx.fee,
            created_at: Utc::now(),
        };
        t.transactions.insert(id, record.clone());
        Ok(record)
    }

    fn transaction_by_three_d(&self, three_d_id: Id) -> MinterResult<Option<MintingTransaction>> {
        Ok(self.lock()?.transactions.values().rev().find(|x| x.three_d_ordinal_id == three_d_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_ordinal(inscription: &str, owner: &str) -> NewOrdinal {
        NewOrdinal {
            inscription_id: inscription.into(),
            inscription_number: 1_000_123,
            content: "data:image/png;base64,AAAA".into(),
            content_type: "image/png".into(),
            owner: owner.into(),
            collection_id: 1,
        }
    }

    #[test]
    fn seeded_fixtures_respect_supply() {
        let s = MemStorage::new();
        let collections = s.collections().unwrap();
        assert_eq!(collections.len(), 1);
        assert!(collections.iter().all(|c| c.minted <= c.max_supply));
        assert_eq!(s.collection_by_slug(PIXEL_FOXES_SLUG).unwrap().unwrap().name, "Pixel Foxes");

        let examples = s.example_three_d().unwrap();
        assert_eq!(examples.len(), 4);
        assert!(examples.iter().all(|x| x.owner == EXAMPLE_OWNER));
        assert_eq!(examples[0].name.as_deref(), Some("Pixel Fox #247"));
    }

    #[test]
    fn ordinal_lookup_by_id_or_inscription() {
        let s = MemStorage::empty();
        let o = s.create_ordinal(new_ordinal("inscription-1-abc", "1Alice")).unwrap();
        assert_eq!(o.id, 1);
        assert_eq!(s.ordinal("1").unwrap().unwrap().inscription_id, "inscription-1-abc");
        assert_eq!(s.ordinal("inscription-1-abc").unwrap().unwrap().id, 1);
        assert!(s.ordinal("2").unwrap().is_none());
        assert!(matches!(s.create_ordinal(new_ordinal("inscription-1-abc", "1Bob")), Err(MinterError::Duplicate(_))));
    }

    #[test]
    fn ownership_check_is_lenient_for_unknown() {
        let s = MemStorage::empty();
        s.create_ordinal(new_ordinal("inscription-2-xyz", "1Alice")).unwrap();
        assert!(s.validate_ownership("inscription-2-xyz", "1Alice").unwrap());
        assert!(!s.validate_ownership("inscription-2-xyz", "1Mallory").unwrap());
        assert!(s.validate_ownership("never-seen", "1Mallory").unwrap());
    }

    #[test]
    fn users_are_unique_by_name() {
        let s = MemStorage::empty();
        let u = s.create_user(NewUser { username: "satoshi".into(), password: "pw".into() }).unwrap();
        assert_eq!(s.user(u.id).unwrap().unwrap().username, "satoshi");
        assert_eq!(s.user_by_username("satoshi").unwrap().unwrap().id, u.id);
        assert!(s.create_user(NewUser { username: "satoshi".into(), password: "x".into() }).is_err());
    }

    #[test]
    fn recent_is_newest_first_and_limited() {
        let s = MemStorage::new();
        let recent = s.recent_three_d(2).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].name.as_deref(), Some("Pixel Fox #247"));
        assert_eq!(recent[1].name.as_deref(), Some("Pixel Fox #592"));
    }

    #[test]
    fn search_matches_name_owner_or_inscription() {
        let s = MemStorage::new();
        assert_eq!(s.search_three_d("fox #13").unwrap().len(), 1);
        assert_eq!(s.search_three_d("example owner").unwrap().len(), 4);
        assert_eq!(s.search_three_d("3d-9012").unwrap().len(), 1);
        assert!(s.search_three_d("no such thing").unwrap().is_empty());
    }

    #[test]
    fn updates_return_none_for_missing_rows() {
        let s = MemStorage::new();
        assert!(s.update_collection(99, CollectionUpdate::three_d_minted(1)).unwrap().is_none());
        let updated = s.update_three_d(1, ThreeDUpdate { owner: Some("1Carol".into()), ..Default::default() }).unwrap().unwrap();
        assert_eq!(updated.owner, "1Carol");
        assert!(s.update_three_d(999, ThreeDUpdate::default()).unwrap().is_none());
    }

    #[test]
    fn transactions_link_to_three_d() {
        let s = MemStorage::empty();
        assert!(s.transaction_by_three_d(5).unwrap().is_none());
        let tx = s.create_transaction(NewTransaction {
            transaction_id: "ff".repeat(32),
            status: TxStatus::Confirmed,
            inscription_number: 2_000_001,
            ordinal_id: 1,
            three_d_ordinal_id: 5,
            owner: "1Alice".into(),
            fee: 12_100,
        }).unwrap();
        assert_eq!(s.transaction_by_three_d(5).unwrap().unwrap().transaction_id, tx.transaction_id);
    }
}
