fn main() {
    mvpusc_tasks::entry_points::linalg_ref();
}
