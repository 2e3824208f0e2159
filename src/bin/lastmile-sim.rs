use lastmile::simulation;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    simulation::run().await
}
