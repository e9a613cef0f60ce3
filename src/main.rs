use anyhow::Result;

use orrery::DemoApp;

fn main() -> Result<()> {
    env_logger::init();

    let app = DemoApp::new()?;
    app.run()
}
