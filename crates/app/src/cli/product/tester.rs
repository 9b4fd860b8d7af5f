use aura_app::domain::products::{
    ProductsService,
    data::NewTester,
    records::{ProductUuid, TesterUuid},
};
use clap::Args;

#[derive(Debug, Args)]
pub(crate) struct AddTesterArgs {
    /// Product the tester belongs to
    #[arg(long)]
    product: ProductUuid,

    #[arg(long)]
    name: String,

    /// Price in base currency minor units (US cents)
    #[arg(long)]
    price: u64,

    /// Size label, "5 ml" when omitted
    #[arg(long)]
    size: Option<String>,
}

pub(crate) async fn run(service: &impl ProductsService, args: AddTesterArgs) -> Result<(), String> {
    let tester = service
        .add_tester(
            args.product,
            NewTester {
                uuid: TesterUuid::new(),
                name: args.name,
                price: args.price,
                size: args.size,
            },
        )
        .await
        .map_err(|error| format!("failed to add tester: {error}"))?;

    println!("tester_uuid: {}", tester.uuid);
    println!("size: {}", tester.size);

    Ok(())
}
