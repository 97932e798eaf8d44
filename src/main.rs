fn main() {
    kbasic::term::main()
}
