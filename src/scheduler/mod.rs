pub mod party_reconcile;
