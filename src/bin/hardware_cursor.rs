use hardware_cursor::app::AppConfig;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    hardware_cursor::app::launch(AppConfig::default())
}
