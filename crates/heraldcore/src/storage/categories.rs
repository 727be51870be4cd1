//! Category membership store
//!
//! `user_lists.json` maps locale → category id → `{label, users}`. Every
//! operation works on the active locale's partition and leaves the other
//! partitions untouched.
//!
//! Membership invariant: a user is in the default category `"0"`
//! ("INTERESTED") exactly when they are in no other category. Every mutation
//! rebalances the users it touched.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use super::json_file;
use crate::config::Locale;
use crate::error::{AppError, AppResult};

/// Category key. Sorts numerically when both ids are numbers ("2" < "10"),
/// numeric ids before any others.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(String);

impl CategoryId {
    pub const DEFAULT: &'static str = "0";

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn default_category() -> Self {
        Self(Self::DEFAULT.to_string())
    }

    pub fn is_default(&self) -> bool {
        self.0 == Self::DEFAULT
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Ord for CategoryId {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.0.parse::<u64>(), other.0.parse::<u64>()) {
            (Ok(a), Ok(b)) => a.cmp(&b).then_with(|| self.0.cmp(&other.0)),
            (Ok(_), Err(_)) => Ordering::Less,
            (Err(_), Ok(_)) => Ordering::Greater,
            (Err(_), Err(_)) => self.0.cmp(&other.0),
        }
    }
}

impl PartialOrd for CategoryId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CategoryId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub label: String,
    #[serde(rename = "users", default)]
    pub members: Vec<String>,
}

impl Category {
    fn contains(&self, user_id: &str) -> bool {
        self.members.iter().any(|m| m == user_id)
    }

    fn insert(&mut self, user_id: &str) {
        if !self.contains(user_id) {
            self.members.push(user_id.to_string());
        }
    }

    fn remove(&mut self, user_id: &str) {
        self.members.retain(|m| m != user_id);
    }
}

type Partition = BTreeMap<CategoryId, Category>;
type CategoryFile = BTreeMap<String, Partition>;

/// How `add_user` addresses its target category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryRef {
    Id(CategoryId),
    /// Looked up by label; created with a fresh id if no category has it
    Label(String),
}

/// JSON-backed category store bound to one locale.
///
/// Read-modify-write cycles are serialized by an internal lock and only
/// write the file when the partition actually changed.
#[derive(Debug)]
pub struct CategoryStore {
    path: PathBuf,
    locale: Locale,
    lock: Mutex<()>,
}

impl CategoryStore {
    pub fn new(path: impl Into<PathBuf>, locale: Locale) -> Self {
        Self {
            path: path.into(),
            locale,
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_partition(&self) -> AppResult<Partition> {
        let mut file: CategoryFile = json_file::read_or_default(&self.path)?;
        Ok(file.remove(self.locale.code()).unwrap_or_default())
    }

    fn mutate<R>(&self, f: impl FnOnce(&mut Partition) -> AppResult<R>) -> AppResult<R> {
        // A poisoned lock only means another mutation panicked; the file is still whole.
        let _guard = self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        let mut file: CategoryFile = json_file::read_or_default(&self.path)?;
        let partition = file.entry(self.locale.code().to_string()).or_default();
        let before = partition.clone();

        let result = f(partition)?;

        if *partition != before {
            json_file::write_atomic(&self.path, &file)?;
        }
        Ok(result)
    }

    /// All categories as `(id, label)` in natural id order, which is file order
    /// for ids handed out by this store.
    pub fn list_categories(&self) -> AppResult<Vec<(CategoryId, String)>> {
        Ok(self
            .load_partition()?
            .into_iter()
            .map(|(id, category)| (id, category.label))
            .collect())
    }

    /// Labels of every category the user belongs to.
    pub fn categories_for_user(&self, user_id: &str) -> AppResult<Vec<String>> {
        Ok(self
            .load_partition()?
            .into_values()
            .filter(|category| category.contains(user_id))
            .map(|category| category.label)
            .collect())
    }

    /// Category labels of every member, from a single read of the file.
    pub fn labels_by_user(&self) -> AppResult<HashMap<String, Vec<String>>> {
        let mut labels: HashMap<String, Vec<String>> = HashMap::new();
        for category in self.load_partition()?.into_values() {
            for member in category.members {
                labels.entry(member).or_default().push(category.label.clone());
            }
        }
        Ok(labels)
    }

    pub fn is_user_in_category(&self, user_id: &str, label: &str) -> AppResult<bool> {
        Ok(self
            .load_partition()?
            .values()
            .any(|category| category.label == label && category.contains(user_id)))
    }

    pub fn is_user_in_any_non_default_category(&self, user_id: &str) -> AppResult<bool> {
        Ok(in_non_default(&self.load_partition()?, user_id))
    }

    pub fn label_for(&self, category_id: &CategoryId) -> AppResult<String> {
        self.load_partition()?
            .remove(category_id)
            .map(|category| category.label)
            .ok_or_else(|| AppError::CategoryNotFound(category_id.to_string()))
    }

    pub fn members_of(&self, category_id: &CategoryId) -> AppResult<Vec<String>> {
        self.load_partition()?
            .remove(category_id)
            .map(|category| category.members)
            .ok_or_else(|| AppError::CategoryNotFound(category_id.to_string()))
    }

    /// Adds one user. A label that matches no category creates one, keyed by
    /// the current category count (bumped past any taken id).
    ///
    /// Returns the id of the category the user was added to.
    pub fn add_user(&self, user_id: &str, target: CategoryRef) -> AppResult<CategoryId> {
        self.mutate(|partition| {
            let id = match target {
                CategoryRef::Id(id) => {
                    if !partition.contains_key(&id) {
                        return Err(AppError::CategoryNotFound(id.to_string()));
                    }
                    id
                }
                CategoryRef::Label(label) => match partition.iter().find(|(_, c)| c.label == label) {
                    Some((id, _)) => id.clone(),
                    None => {
                        let id = fresh_id(partition);
                        log::info!("Creating category {} ({})", id, label);
                        partition.insert(
                            id.clone(),
                            Category {
                                label,
                                members: Vec::new(),
                            },
                        );
                        id
                    }
                },
            };

            if let Some(category) = partition.get_mut(&id) {
                category.insert(user_id);
            }
            rebalance(partition, user_id);
            Ok(id)
        })
    }

    /// Removes one user from a category. Absent users leave the file untouched.
    pub fn remove_user(&self, user_id: &str, category_id: &CategoryId) -> AppResult<()> {
        self.mutate(|partition| {
            let category = category_mut(partition, category_id)?;
            if !category.contains(user_id) {
                return Ok(());
            }
            category.remove(user_id);
            rebalance(partition, user_id);
            Ok(())
        })
    }

    /// Overwrites a category's member list (deduplicated, first occurrence wins).
    pub fn replace_members(&self, category_id: &CategoryId, user_ids: &[String]) -> AppResult<()> {
        self.mutate(|partition| {
            let category = category_mut(partition, category_id)?;
            let mut touched = std::mem::take(&mut category.members);
            for user_id in user_ids {
                category.insert(user_id);
            }
            touched.extend(user_ids.iter().cloned());

            for user_id in &touched {
                rebalance(partition, user_id);
            }
            Ok(())
        })
    }

    pub fn add_members(&self, category_id: &CategoryId, user_ids: &[String]) -> AppResult<()> {
        self.mutate(|partition| {
            let category = category_mut(partition, category_id)?;
            for user_id in user_ids {
                category.insert(user_id);
            }
            for user_id in user_ids {
                rebalance(partition, user_id);
            }
            Ok(())
        })
    }

    pub fn remove_members(&self, category_id: &CategoryId, user_ids: &[String]) -> AppResult<()> {
        self.mutate(|partition| {
            let category = category_mut(partition, category_id)?;
            let present: Vec<&String> = user_ids.iter().filter(|u| category.contains(u)).collect();
            for user_id in &present {
                category.remove(user_id);
            }
            for user_id in present {
                rebalance(partition, user_id);
            }
            Ok(())
        })
    }
}

fn category_mut<'a>(partition: &'a mut Partition, category_id: &CategoryId) -> AppResult<&'a mut Category> {
    partition
        .get_mut(category_id)
        .ok_or_else(|| AppError::CategoryNotFound(category_id.to_string()))
}

fn in_non_default(partition: &Partition, user_id: &str) -> bool {
    partition
        .iter()
        .any(|(id, category)| !id.is_default() && category.contains(user_id))
}

fn rebalance(partition: &mut Partition, user_id: &str) {
    let elsewhere = in_non_default(partition, user_id);
    let Some(default) = partition.get_mut(&CategoryId::default_category()) else {
        log::warn!("Default category {} is missing, membership not rebalanced", CategoryId::DEFAULT);
        return;
    };
    if elsewhere {
        default.remove(user_id);
    } else {
        default.insert(user_id);
    }
}

fn fresh_id(partition: &Partition) -> CategoryId {
    let mut n = partition.len();
    loop {
        let id = CategoryId::new(n.to_string());
        if !partition.contains_key(&id) {
            return id;
        }
        n += 1;
    }
}
