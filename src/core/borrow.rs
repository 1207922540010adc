//! Department pools and the cross-department borrow protocol.
//!
//! A department first tries its own pool. When that is empty it enters a single
//! negotiation lock shared by every department and walks its lender list in
//! order, taking the first sibling unit it finds. Serializing negotiation means
//! two departments can never both claim a sibling's last unit.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::config::DepartmentCapacities;
use crate::core::{Department, DispatchError, ResourcePool};

/// Default lender order per department.
const DEFAULT_LENDERS: [(Department, [Department; 2]); 3] = [
    (Department::Police, [Department::Fire, Department::Ambulance]),
    (Department::Ambulance, [Department::Police, Department::Fire]),
    (Department::Fire, [Department::Police, Department::Ambulance]),
];

/// Ordered lender list for each department.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BorrowPolicy {
    lenders: [Vec<Department>; 3],
}

impl BorrowPolicy {
    /// Build a policy from `(borrower, lenders)` rows. Departments without a row
    /// never borrow.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::InvalidConfig`] if a department lists itself or
    /// lists a lender twice.
    pub fn new(table: &[(Department, &[Department])]) -> Result<Self, DispatchError> {
        let mut lenders: [Vec<Department>; 3] = Default::default();
        for (borrower, row) in table {
            let slot = &mut lenders[borrower.index()];
            for lender in *row {
                if lender == borrower {
                    return Err(DispatchError::InvalidConfig(format!(
                        "{borrower} cannot borrow from itself"
                    )));
                }
                if slot.contains(lender) {
                    return Err(DispatchError::InvalidConfig(format!(
                        "{borrower} lists {lender} twice"
                    )));
                }
                slot.push(*lender);
            }
        }
        Ok(Self { lenders })
    }

    /// Lenders for `borrower`, in the order they are tried.
    #[must_use]
    pub fn lenders(&self, borrower: Department) -> &[Department] {
        &self.lenders[borrower.index()]
    }
}

impl Default for BorrowPolicy {
    fn default() -> Self {
        let mut lenders: [Vec<Department>; 3] = Default::default();
        for (borrower, row) in DEFAULT_LENDERS {
            lenders[borrower.index()] = row.to_vec();
        }
        Self { lenders }
    }
}

/// Where a granted unit came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitSource {
    /// The department's own pool.
    Own,
    /// A sibling pool.
    Borrowed(Department),
}

/// A unit taken from some pool; it must go back to exactly that pool.
#[derive(Debug, Clone)]
pub struct Grant {
    /// Origin of the unit.
    pub source: UnitSource,
    /// Pool the unit is returned to.
    pub pool: Arc<ResourcePool>,
}

impl Grant {
    /// Whether the unit belongs to another department.
    #[must_use]
    pub const fn is_borrowed(&self) -> bool {
        matches!(self.source, UnitSource::Borrowed(_))
    }

    /// Lending department, if borrowed.
    #[must_use]
    pub const fn lender(&self) -> Option<Department> {
        match self.source {
            UnitSource::Own => None,
            UnitSource::Borrowed(d) => Some(d),
        }
    }
}

/// The three department pools plus the global negotiation lock.
#[derive(Debug)]
pub struct PoolSet {
    pools: [Arc<ResourcePool>; 3],
    policy: BorrowPolicy,
    negotiation: Mutex<()>,
}

impl PoolSet {
    /// Create full pools sized by `capacities`.
    #[must_use]
    pub fn new(capacities: &DepartmentCapacities, policy: BorrowPolicy) -> Self {
        let pools =
            Department::ALL.map(|d| Arc::new(ResourcePool::new(d, capacities.get(d))));
        Self {
            pools,
            policy,
            negotiation: Mutex::new(()),
        }
    }

    /// Pool owned by `department`.
    #[must_use]
    pub fn pool(&self, department: Department) -> &Arc<ResourcePool> {
        &self.pools[department.index()]
    }

    /// Borrow policy in force.
    #[must_use]
    pub const fn policy(&self) -> &BorrowPolicy {
        &self.policy
    }

    /// Acquire a unit for `department`, locally first and then by borrowing.
    /// Never waits for a unit to be released.
    pub fn acquire_for(&self, department: Department) -> Option<Grant> {
        let own = self.pool(department);
        if own.try_acquire() {
            return Some(Grant {
                source: UnitSource::Own,
                pool: Arc::clone(own),
            });
        }
        self.borrow_for(department)
    }

    /// Try each lender of `department` in order under the negotiation lock.
    pub fn borrow_for(&self, department: Department) -> Option<Grant> {
        let _negotiating = self.negotiation.lock();
        for &lender in self.policy.lenders(department) {
            let pool = self.pool(lender);
            if pool.available() > 0 && pool.try_acquire() {
                tracing::debug!(
                    borrower = %department,
                    lender = %lender,
                    left = pool.available(),
                    "unit borrowed"
                );
                return Some(Grant {
                    source: UnitSource::Borrowed(lender),
                    pool: Arc::clone(pool),
                });
            }
        }
        None
    }
}
