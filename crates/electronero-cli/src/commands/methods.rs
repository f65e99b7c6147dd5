//! `electronero methods`: list the operations the client knows about.

use electronero_rpc::dispatch::ExplicitMethod;
use electronero_rpc::MethodGroup;

use super::build_client;
use crate::ConnectionArgs;

/// Run the `methods` subcommand. Needs no network.
pub fn run(
    args: &ConnectionArgs,
    group: Option<MethodGroup>,
    wire: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let client = build_client(args)?;
    let wanted = |g: MethodGroup| group.map_or(true, |only| only == g);

    if wire {
        for g in MethodGroup::ALL.into_iter().filter(|g| wanted(*g)) {
            for name in client.registry().wire_names(g) {
                println!("{g}\t{name}");
            }
        }
        return Ok(());
    }

    if group.is_none() {
        for method in ExplicitMethod::ALL {
            println!("explicit\t{}", method.as_str());
        }
    }
    for (name, descriptor) in client.methods().iter() {
        if wanted(descriptor.group) {
            println!("{}\t{name}\t{}", descriptor.group, descriptor.wire_name);
        }
    }
    Ok(())
}
