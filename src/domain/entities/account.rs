/// Owning account of a profile. Accounts are managed upstream; this service
/// only ever holds their id.
#[derive(Debug, Clone)]
pub struct Account;
