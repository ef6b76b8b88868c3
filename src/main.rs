use bubbletea_rs::Program;
use minitimer::app::App;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let program = Program::<App>::builder()
        .alt_screen(true)
        .signal_handler(true)
        .build()?;
    program.run().await?;
    Ok(())
}
