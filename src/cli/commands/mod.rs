pub mod blueprint;
pub mod scenario;
pub mod system;

use crate::cli::registry::CommandRegistry;

pub(crate) fn register_all(registry: &mut CommandRegistry) {
    for entry in scenario::definitions()
        .into_iter()
        .chain(blueprint::definitions())
        .chain(system::definitions())
    {
        registry.register(entry);
    }
}
