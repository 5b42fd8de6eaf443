//! Paged secret enumeration.

use std::iter::FusedIterator;
use tracing::{debug, trace};

use crate::core::domain::{Secret, SecretSummary};
use crate::core::store::SecretStore;
use crate::error::Result;

/// Lazy iterator over every secret of a store, values included.
///
/// Pages are requested on demand and each listed secret costs one extra
/// fetch, since listings carry no values. The first error is yielded once
/// and ends the iteration.
pub struct Secrets<'a, S: ?Sized> {
    store: &'a S,
    page: std::vec::IntoIter<SecretSummary>,
    cursor: Option<String>,
    pages: usize,
    done: bool,
}

/// Start enumerating `store` from its first page.
///
/// Each call starts over; an enumeration cannot be resumed mid-stream.
pub fn enumerate<S: SecretStore + ?Sized>(store: &S) -> Secrets<'_, S> {
    Secrets {
        store,
        page: Vec::new().into_iter(),
        cursor: None,
        pages: 0,
        done: false,
    }
}

impl<S: SecretStore + ?Sized> Secrets<'_, S> {
    fn fail(&mut self, err: crate::error::Error) -> Option<Result<Secret>> {
        self.done = true;
        Some(Err(err))
    }
}

impl<S: SecretStore + ?Sized> Iterator for Secrets<'_, S> {
    type Item = Result<Secret>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.done {
                return None;
            }

            if let Some(summary) = self.page.next() {
                trace!(vault = self.store.vault(), secret = %summary.name, "fetching secret value");
                return match self.store.get(&summary.name) {
                    Ok(secret) => Some(Ok(secret)),
                    Err(e) => self.fail(e),
                };
            }

            // Current page drained: stop after the last page, else fetch the next.
            if self.pages > 0 && self.cursor.is_none() {
                self.done = true;
                debug!(vault = self.store.vault(), pages = self.pages, "enumeration complete");
                return None;
            }

            let cursor = self.cursor.take();
            match self.store.list_page(cursor.as_deref()) {
                Ok(page) => {
                    self.pages += 1;
                    debug!(
                        vault = self.store.vault(),
                        page = self.pages,
                        items = page.items.len(),
                        "fetched secrets page"
                    );
                    self.page = page.items.into_iter();
                    self.cursor = page.next;
                }
                Err(e) => return self.fail(e),
            }
        }
    }
}

impl<S: SecretStore + ?Sized> FusedIterator for Secrets<'_, S> {}
