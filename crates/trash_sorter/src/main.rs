fn main() {
    trash_sorter::run();
}
