//! In-memory [`RecordStore`] used by service tests.

use std::future::Future;
use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};

use hivekeep_domain::error::{HiveKeepError, NotFoundError};
use hivekeep_domain::record::{Draft, Page, Record};

use crate::ports::{ChildStore, RecordStore};

type ChildCounter<R> =
    Box<dyn Fn(<R as Record>::Id) -> <R as Record>::ChildCount + Send + Sync>;

pub(crate) struct MemoryStore<R: Record> {
    rows: Mutex<Vec<R>>,
    next_id: AtomicI64,
    saves: AtomicUsize,
    /// Known parents; `None` means every parent exists.
    parents: Option<Vec<R::Parent>>,
    children: ChildCounter<R>,
}

impl<R> Default for MemoryStore<R>
where
    R: Record,
    R::ChildCount: Default,
{
    fn default() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
            saves: AtomicUsize::new(0),
            parents: None,
            children: Box::new(|_| R::ChildCount::default()),
        }
    }
}

impl<R> MemoryStore<R>
where
    R: Record,
    R::ChildCount: Default,
{
    pub(crate) fn with_parents(parents: Vec<R::Parent>) -> Self {
        Self {
            parents: Some(parents),
            ..Self::default()
        }
    }
}

impl<R: Record> MemoryStore<R> {
    pub(crate) fn with_children(
        mut self,
        counter: impl Fn(R::Id) -> R::ChildCount + Send + Sync + 'static,
    ) -> Self {
        self.children = Box::new(counter);
        self
    }

    pub(crate) fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub(crate) fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl<R> RecordStore<R> for MemoryStore<R>
where
    R: Record,
    R::Id: From<i64>,
{
    fn find_by_id(
        &self,
        id: R::Id,
    ) -> impl Future<Output = Result<Option<R>, HiveKeepError>> + Send {
        let rows = self.rows.lock().unwrap();
        let result = rows.iter().find(|row| row.id() == id).cloned();
        async { Ok(result) }
    }

    fn find_by_code(
        &self,
        code: &str,
        except: Option<R::Id>,
    ) -> impl Future<Output = Result<Option<R>, HiveKeepError>> + Send {
        let rows = self.rows.lock().unwrap();
        let result = rows
            .iter()
            .find(|row| row.code() == code && Some(row.id()) != except)
            .cloned();
        async { Ok(result) }
    }

    fn parent_exists(
        &self,
        parent: R::Parent,
    ) -> impl Future<Output = Result<bool, HiveKeepError>> + Send {
        let exists = self
            .parents
            .as_ref()
            .is_none_or(|parents| parents.contains(&parent));
        async move { Ok(exists) }
    }

    fn list(&self, page: Page) -> impl Future<Output = Result<Vec<R>, HiveKeepError>> + Send {
        let rows = self.rows.lock().unwrap();
        let result = page.slice(rows.iter().cloned());
        async { Ok(result) }
    }

    fn count_children(
        &self,
        id: R::Id,
    ) -> impl Future<Output = Result<R::ChildCount, HiveKeepError>> + Send {
        let count = (self.children)(id);
        async { Ok(count) }
    }

    fn insert(&self, draft: Draft<R>) -> impl Future<Output = Result<R, HiveKeepError>> + Send {
        let id = R::Id::from(self.next_id.fetch_add(1, Ordering::SeqCst));
        let record = R::from_draft(id, draft);
        self.rows.lock().unwrap().push(record.clone());
        async { Ok(record) }
    }

    fn save(&self, record: &R) -> impl Future<Output = Result<(), HiveKeepError>> + Send {
        let mut rows = self.rows.lock().unwrap();
        let result = match rows.iter_mut().find(|row| row.id() == record.id()) {
            Some(row) => {
                *row = record.clone();
                self.saves.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
            None => Err(NotFoundError::new(R::KIND, record.id()).into()),
        };
        async { result }
    }

    fn remove(&self, id: R::Id) -> impl Future<Output = Result<(), HiveKeepError>> + Send {
        self.rows.lock().unwrap().retain(|row| row.id() != id);
        async { Ok(()) }
    }
}

impl<R> ChildStore<R> for MemoryStore<R>
where
    R: Record,
    R::Id: From<i64>,
{
    fn list_by_parent(
        &self,
        parent: R::Parent,
        page: Page,
    ) -> impl Future<Output = Result<Vec<R>, HiveKeepError>> + Send {
        let rows = self.rows.lock().unwrap();
        let result = page.slice(rows.iter().filter(|row| row.parent() == parent).cloned());
        async { Ok(result) }
    }
}
