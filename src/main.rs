fn main() {
    app_relocator::run()
}
