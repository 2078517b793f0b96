fn main() {
    tally_cli::main()
}
