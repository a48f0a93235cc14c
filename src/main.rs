fn main() -> eframe::Result<()> {
    mapmeasure::run()
}
