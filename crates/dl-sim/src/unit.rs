//! Stage-then-commit helper shared by the loops and use cases.

use dl_store::UnitOfWork;

use crate::SimResult;

/// Run `stage` and commit what it staged.
///
/// If staging or the commit fails, every write staged so far is rolled back
/// before the error is returned, so the next commit starts from a clean batch.
pub(crate) fn in_unit_of_work<S, T>(store: &mut S, stage: impl FnOnce(&mut S) -> SimResult<T>) -> SimResult<T>
where
    S: UnitOfWork + ?Sized,
{
    let result = stage(store).and_then(|value| {
        store.commit()?;
        Ok(value)
    });
    if result.is_err() {
        store.rollback();
    }
    result
}
